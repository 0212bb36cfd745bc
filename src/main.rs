use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spplcli::{cli, config, error, types::MoveDirection, types::PkceToken, utils};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Search the catalog for tracks, albums and artists
    Search(SearchOptions),

    /// List or sync the playlist collection
    Playlists(PlaylistsOptions),

    /// Create and edit a single playlist
    Playlist(PlaylistOptions),

    /// Toggle a playlist in the bulk selection
    Select(SelectOptions),

    /// Delete selected or named playlists
    Delete(DeleteOptions),

    /// Export playlists to a portable JSON document
    Export(ExportOptions),

    /// Import playlists from a portable JSON document
    Import(ImportOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Free-text query
    query: String,

    /// Result categories to search; `all` expands to every category
    #[clap(
        long = "kind",
        default_value = "all",
        value_parser = utils::parse_search_kinds
    )]
    kinds: utils::SearchKinds,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "List or sync the playlist collection",
    args_conflicts_with_subcommands = true
)]
pub struct PlaylistsOptions {
    /// Subcommands under `playlists` (e.g., `sync`)
    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// Rebuild the local collection from the remote side
    Sync,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Create a new private playlist
    Create {
        #[clap(long)]
        name: String,
        #[clap(long, default_value = "")]
        description: String,
    },

    /// Show a playlist with its track listing
    Show {
        playlist_id: String,
        /// Re-fetch the authoritative snapshot first
        #[clap(long)]
        refresh: bool,
    },

    /// Add a track by resource URI (spotify:track:... or spotify:episode:...)
    Add { playlist_id: String, uri: String },

    /// Remove a track by its catalog id
    Remove { playlist_id: String, track_id: String },

    /// Move the track at a position one slot up or down
    Move {
        playlist_id: String,
        position: usize,
        #[clap(value_parser = utils::parse_move_direction)]
        direction: MoveDirection,
    },

    /// Rename a playlist
    Rename { playlist_id: String, name: String },

    /// Replace a playlist description
    Describe {
        playlist_id: String,
        description: String,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct SelectOptions {
    playlist_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOptions {
    /// Delete the current selection
    #[clap(long)]
    selected: bool,

    /// Playlist ids to delete
    ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Output file for the playlist document
    #[clap(long, default_value = "playlists.json")]
    output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// Playlist document to import
    file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Search(opt) => cli::search(opt.query, opt.kinds).await,
        Command::Playlists(opt) => match opt.command {
            Some(PlaylistsSubcommand::Sync) => cli::sync_playlists().await,
            None => cli::list_playlists().await,
        },
        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::Create { name, description } => {
                cli::create_playlist(name, description).await
            }
            PlaylistSubcommand::Show {
                playlist_id,
                refresh,
            } => cli::show_playlist(playlist_id, refresh).await,
            PlaylistSubcommand::Add { playlist_id, uri } => cli::add_track(playlist_id, uri).await,
            PlaylistSubcommand::Remove {
                playlist_id,
                track_id,
            } => cli::remove_track(playlist_id, track_id).await,
            PlaylistSubcommand::Move {
                playlist_id,
                position,
                direction,
            } => cli::move_track(playlist_id, position, direction).await,
            PlaylistSubcommand::Rename { playlist_id, name } => {
                cli::rename_playlist(playlist_id, name).await
            }
            PlaylistSubcommand::Describe {
                playlist_id,
                description,
            } => cli::redescribe_playlist(playlist_id, description).await,
        },
        Command::Select(opt) => cli::toggle_select(opt.playlist_id).await,
        Command::Delete(opt) => cli::delete_playlists(opt.selected, opt.ids).await,
        Command::Export(opt) => cli::export(opt.output).await,
        Command::Import(opt) => cli::import(opt.file).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
