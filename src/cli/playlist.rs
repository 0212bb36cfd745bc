use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli, info,
    management::PlaylistLibrary,
    spotify::WebCatalog,
    success,
    types::{MoveDirection, Playlist, PlaylistTableRow, Track, TrackTableRow},
    utils, warning,
};

/// Lists the cached playlist collection.
pub async fn list_playlists() {
    let library = PlaylistLibrary::load().await;

    if library.playlists().is_empty() {
        info!("No playlists cached. Run spplcli playlists sync first.");
        return;
    }

    let rows: Vec<PlaylistTableRow> = library
        .playlists()
        .iter()
        .map(|p| PlaylistTableRow {
            selected: if library.is_selected(&p.id) {
                "*".to_string()
            } else {
                String::new()
            },
            id: p.id.clone(),
            name: p.name.clone(),
            tracks: p.tracks.len(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

/// Rebuilds the local collection from the remote side.
pub async fn sync_playlists() {
    let token = cli::valid_token().await;
    let api = WebCatalog;
    let mut library = PlaylistLibrary::load().await;

    let pb = spinner("Syncing playlists...");
    let result = library.sync(&api, &token).await;
    pb.finish_and_clear();

    match result {
        Ok(count) => {
            persist(&library).await;
            success!("Synced {} playlists.", count);
        }
        Err(e) => cli::report_failure("Failed to sync playlists", &e),
    }
}

pub async fn create_playlist(name: String, description: String) {
    let token = cli::valid_token().await;
    let api = WebCatalog;
    let mut library = PlaylistLibrary::load().await;

    match library
        .create_playlist(&api, &token, &name, &description)
        .await
    {
        Ok(id) => {
            persist(&library).await;
            success!("Created playlist '{}' ({}).", name, id);
        }
        Err(e) => cli::report_failure("Failed to create playlist", &e),
    }
}

/// Shows one playlist with its track listing, optionally re-fetching the
/// authoritative snapshot first.
pub async fn show_playlist(playlist_id: String, refresh: bool) {
    let mut library = PlaylistLibrary::load().await;

    if refresh {
        let token = cli::valid_token().await;
        let api = WebCatalog;
        match library.refresh_playlist(&api, &token, &playlist_id).await {
            Ok(()) => persist(&library).await,
            Err(e) => cli::report_failure("Failed to refresh playlist", &e),
        }
    }

    match library.get(&playlist_id) {
        Some(playlist) => print_playlist(playlist),
        None => warning!("No playlist {} in the local collection.", playlist_id),
    }
}

/// Adds a track to a playlist by playable resource URI.
pub async fn add_track(playlist_id: String, uri: String) {
    let (_, opaque_id) = match utils::parse_resource_uri(&uri) {
        Ok(parsed) => parsed,
        Err(e) => {
            warning!("Invalid track URI: {}", e);
            return;
        }
    };

    let token = cli::valid_token().await;
    let api = WebCatalog;
    let mut library = PlaylistLibrary::load().await;

    let track = Track::from_uri(&uri, opaque_id);
    match library.add_track(&api, &token, &playlist_id, track).await {
        Ok(()) => {
            // Hydrate name and artists from the authoritative snapshot.
            if let Err(e) = library.refresh_playlist(&api, &token, &playlist_id).await {
                cli::report_failure("Track added, but refreshing the snapshot failed", &e);
            }
            persist(&library).await;
            success!("Added {} to playlist {}.", uri, playlist_id);
        }
        Err(e) => cli::report_failure("Failed to add track", &e),
    }
}

pub async fn remove_track(playlist_id: String, track_id: String) {
    let token = cli::valid_token().await;
    let api = WebCatalog;
    let mut library = PlaylistLibrary::load().await;

    match library
        .remove_track(&api, &token, &playlist_id, &track_id)
        .await
    {
        Ok(()) => {
            persist(&library).await;
            success!("Removed track {} from playlist {}.", track_id, playlist_id);
        }
        Err(e) => cli::report_failure("Failed to remove track", &e),
    }
}

pub async fn move_track(playlist_id: String, position: usize, direction: MoveDirection) {
    let token = cli::valid_token().await;
    let api = WebCatalog;
    let mut library = PlaylistLibrary::load().await;

    match library
        .reorder_track(&api, &token, &playlist_id, position, direction)
        .await
    {
        Ok(()) => {
            persist(&library).await;
            success!("Moved track at position {}.", position);
        }
        Err(e) => cli::report_failure("Failed to move track", &e),
    }
}

pub async fn rename_playlist(playlist_id: String, name: String) {
    let token = cli::valid_token().await;
    let api = WebCatalog;
    let mut library = PlaylistLibrary::load().await;

    match library
        .rename_playlist(&api, &token, &playlist_id, &name)
        .await
    {
        Ok(()) => {
            persist(&library).await;
            success!("Renamed playlist {} to '{}'.", playlist_id, name);
        }
        Err(e) => cli::report_failure("Failed to rename playlist", &e),
    }
}

pub async fn redescribe_playlist(playlist_id: String, description: String) {
    let token = cli::valid_token().await;
    let api = WebCatalog;
    let mut library = PlaylistLibrary::load().await;

    match library
        .redescribe_playlist(&api, &token, &playlist_id, &description)
        .await
    {
        Ok(()) => {
            persist(&library).await;
            success!("Updated description of playlist {}.", playlist_id);
        }
        Err(e) => cli::report_failure("Failed to update description", &e),
    }
}

/// Toggles a playlist in or out of the bulk selection.
pub async fn toggle_select(playlist_id: String) {
    let mut library = PlaylistLibrary::load().await;

    match library.toggle_select(&playlist_id) {
        Ok(true) => {
            persist(&library).await;
            success!("Selected playlist {}.", playlist_id);
        }
        Ok(false) => {
            persist(&library).await;
            success!("Deselected playlist {}.", playlist_id);
        }
        Err(e) => cli::report_failure("Failed to toggle selection", &e),
    }
}

/// Deletes exactly the named playlists; `--selected` adds the current
/// selection to the batch. Explicit ids never pull in playlists that merely
/// sit in the selection from an earlier `select`. Remote deletes run
/// concurrently; each playlist is evicted locally only when its own delete
/// succeeded.
pub async fn delete_playlists(use_selection: bool, ids: Vec<String>) {
    let mut library = PlaylistLibrary::load().await;

    if !use_selection && ids.is_empty() {
        warning!("Nothing to delete. Pass playlist ids or --selected.");
        return;
    }

    if use_selection && ids.is_empty() && library.selected_ids().is_empty() {
        info!("Selection is empty.");
        return;
    }

    let token = cli::valid_token().await;
    let api = WebCatalog;

    let pb = spinner("Deleting playlists...");
    let outcome = if ids.is_empty() {
        library.delete_selected(&api, &token).await
    } else {
        let mut targets = ids;
        if use_selection {
            for id in library.selected_ids() {
                if !targets.contains(&id) {
                    targets.push(id);
                }
            }
        }
        library.delete_playlists(&api, &token, &targets).await
    };
    pb.finish_and_clear();

    persist(&library).await;

    for id in &outcome.deleted {
        success!("Deleted playlist {}.", id);
    }
    for (id, err) in &outcome.failed {
        warning!("Failed to delete playlist {}: {}", id, err);
    }
}

fn print_playlist(playlist: &Playlist) {
    info!("{} ({})", playlist.name, playlist.id);
    if !playlist.description.is_empty() {
        info!("{}", playlist.description);
    }

    if playlist.tracks.is_empty() {
        info!("No tracks.");
        return;
    }

    let rows: Vec<TrackTableRow> = playlist
        .tracks
        .iter()
        .enumerate()
        .map(|(position, t)| TrackTableRow {
            position,
            name: t.name.clone(),
            artists: t.artists.join(", "),
            uri: t.uri.clone(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

async fn persist(library: &PlaylistLibrary) {
    if let Err(e) = library.persist().await {
        warning!("Failed to cache playlist library: {}", e);
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
