//! # CLI Module
//!
//! The user-facing command layer. Each command loads the cached playlist
//! library and a valid token, delegates to the management layer (which holds
//! the reconciliation rules), persists the library again and presents the
//! outcome with the status macros and `tabled` tables.
//!
//! ## Command categories
//!
//! - [`auth`] - OAuth 2.0 PKCE authentication flow
//! - [`search`] - catalog search across tracks, albums and artists
//! - [`list_playlists`] / [`sync_playlists`] - collection display and resync
//! - [`create_playlist`], [`show_playlist`], [`add_track`], [`remove_track`],
//!   [`move_track`], [`rename_playlist`], [`redescribe_playlist`] -
//!   single-playlist editing
//! - [`toggle_select`] / [`delete_playlists`] - bulk selection and delete
//! - [`export`] / [`import`] - portable playlist documents
//!
//! ## Error presentation
//!
//! Local policy rejections (duplicate track, blank name, out-of-range move)
//! and classified remote failures both arrive as
//! [`crate::error::LibraryError`]; an `Unauthorized` classification is
//! presented as a re-authentication prompt rather than retried.

mod auth;
mod playlist;
mod search;
mod transfer;

pub use auth::auth;
pub use playlist::add_track;
pub use playlist::create_playlist;
pub use playlist::delete_playlists;
pub use playlist::list_playlists;
pub use playlist::move_track;
pub use playlist::redescribe_playlist;
pub use playlist::remove_track;
pub use playlist::rename_playlist;
pub use playlist::show_playlist;
pub use playlist::sync_playlists;
pub use playlist::toggle_select;
pub use search::search;
pub use transfer::export;
pub use transfer::import;

use crate::{
    error::{ApiError, LibraryError},
    management::TokenManager,
    warning,
};

/// Loads the persisted token and returns a refreshed access token, exiting
/// with a hint to run `spplcli auth` when no token is cached.
pub(crate) async fn valid_token() -> String {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            crate::error!(
                "Failed to load token. Please run spplcli auth\n Error: {}",
                e
            );
        }
    };
    token_mgr.get_valid_token().await
}

/// Presents an operation failure. Credential expiry gets a re-auth prompt,
/// everything else is reported as-is; nothing is retried.
pub(crate) fn report_failure(context: &str, err: &LibraryError) {
    match err {
        LibraryError::Api(ApiError::Unauthorized) => {
            warning!("{}: session expired. Run spplcli auth and retry.", context);
        }
        other => warning!("{}: {}", context, other),
    }
}
