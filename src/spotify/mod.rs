//! # Spotify Integration Module
//!
//! Stateless request wrappers for the slice of the Spotify Web API this tool
//! needs, plus the OAuth 2.0 PKCE flow. Each wrapper performs exactly one
//! HTTP request and returns either the decoded payload or a classified
//! [`ApiError`]; no retry or backoff happens at this layer, retry policy
//! belongs to the caller.
//!
//! ## Architecture
//!
//! ```text
//! Application layer (CLI, management)
//!          ↓
//! CatalogApi trait (one method per remote operation)
//!          ↓
//! WebCatalog → free request functions (user / search / playlist)
//!          ↓
//! HTTP layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The [`CatalogApi`] trait exists so the playlist library, the search
//! aggregator and the import codec can be exercised against a scripted catalog
//! in tests; [`WebCatalog`] is the production implementation and simply
//! delegates to the free functions in the submodules.
//!
//! ## Endpoints covered
//!
//! - `GET /me`: acting user id
//! - `GET /search`: one category per request
//! - `GET /me/playlists`: playlist summaries for resyncing
//! - `GET /playlists/{id}`: full snapshot, authoritative track order
//! - `POST /users/{id}/playlists`: create (always private)
//! - `POST /playlists/{id}/tracks`: append tracks
//! - `DELETE /playlists/{id}/tracks`: remove all occurrences of each URI
//! - `PUT /playlists/{id}/tracks`: single-item range move
//! - `PUT /playlists/{id}`: rename or redescribe, one field at a time
//! - `DELETE /playlists/{id}/followers`: unfollow (idempotent delete)
//! - `POST /api/token`: PKCE code exchange and refresh

pub mod auth;
pub mod playlist;
pub mod search;
pub mod user;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    types::{
        CreatePlaylistResponse, PlaylistResponse, SearchResponse, UserPlaylistsResponse,
        UserProfileResponse,
    },
    utils::SearchKind,
};

/// The remote catalog boundary: one async method per Web API operation.
///
/// All write operations leave retry and deduplication policy to the caller;
/// the remote service itself happily appends duplicate URIs.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn current_user(&self, token: &str) -> Result<UserProfileResponse, ApiError>;

    async fn search(
        &self,
        token: &str,
        query: &str,
        kind: SearchKind,
        limit: u32,
    ) -> Result<SearchResponse, ApiError>;

    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatePlaylistResponse, ApiError>;

    async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError>;

    async fn remove_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError>;

    async fn reorder_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        range_start: usize,
        insert_before: usize,
    ) -> Result<(), ApiError>;

    async fn rename_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        name: &str,
    ) -> Result<(), ApiError>;

    async fn describe_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        description: &str,
    ) -> Result<(), ApiError>;

    async fn delete_playlist(&self, token: &str, playlist_id: &str) -> Result<(), ApiError>;

    async fn get_playlist(&self, token: &str, playlist_id: &str)
    -> Result<PlaylistResponse, ApiError>;

    async fn list_playlists(
        &self,
        token: &str,
        limit: u32,
        offset: u32,
    ) -> Result<UserPlaylistsResponse, ApiError>;
}

/// Production [`CatalogApi`] backed by the Spotify Web API over reqwest.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCatalog;

impl CatalogApi for WebCatalog {
    async fn current_user(&self, token: &str) -> Result<UserProfileResponse, ApiError> {
        user::current_user(token).await
    }

    async fn search(
        &self,
        token: &str,
        query: &str,
        kind: SearchKind,
        limit: u32,
    ) -> Result<SearchResponse, ApiError> {
        search::search(token, query, kind, limit).await
    }

    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatePlaylistResponse, ApiError> {
        playlist::create(token, user_id, name, description).await
    }

    async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError> {
        playlist::add_tracks(token, playlist_id, uris).await.map(|_| ())
    }

    async fn remove_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError> {
        playlist::remove_tracks(token, playlist_id, uris)
            .await
            .map(|_| ())
    }

    async fn reorder_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        range_start: usize,
        insert_before: usize,
    ) -> Result<(), ApiError> {
        playlist::reorder_tracks(token, playlist_id, range_start, insert_before)
            .await
            .map(|_| ())
    }

    async fn rename_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        playlist::rename(token, playlist_id, name).await
    }

    async fn describe_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        description: &str,
    ) -> Result<(), ApiError> {
        playlist::describe(token, playlist_id, description).await
    }

    async fn delete_playlist(&self, token: &str, playlist_id: &str) -> Result<(), ApiError> {
        playlist::unfollow(token, playlist_id).await
    }

    async fn get_playlist(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse, ApiError> {
        playlist::get(token, playlist_id).await
    }

    async fn list_playlists(
        &self,
        token: &str,
        limit: u32,
        offset: u32,
    ) -> Result<UserPlaylistsResponse, ApiError> {
        playlist::list_mine(token, limit, offset).await
    }
}

/// Sends a request and classifies any non-success outcome.
pub(crate) async fn send_checked(req: RequestBuilder) -> Result<Response, ApiError> {
    let response = req
        .send()
        .await
        .map_err(|e| ApiError::Unreachable(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    Err(ApiError::from_status(status, retry_after))
}

/// Decodes a JSON payload, reporting malformed bodies as `Invalid`.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Invalid(format!("malformed response: {}", e)))
}
