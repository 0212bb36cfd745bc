use reqwest::Client;
use serde_json::json;

use crate::{
    config,
    error::ApiError,
    spotify::{decode_json, send_checked},
    types::{
        AddTracksRequest, CreatePlaylistRequest, CreatePlaylistResponse, PlaylistResponse,
        RemoveTracksRequest, ReorderTracksRequest, SnapshotResponse, TrackUriRef,
        UserPlaylistsResponse,
    },
};

/// Creates a new private playlist for the given user.
///
/// Not idempotent: every call creates a fresh playlist and returns its
/// catalog-assigned id.
pub async fn create(
    token: &str,
    user_id: &str,
    name: &str,
    description: &str,
) -> Result<CreatePlaylistResponse, ApiError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = user_id
    );

    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: false,
    };

    let response = send_checked(client.post(&api_url).bearer_auth(token).json(&body)).await?;
    decode_json(response).await
}

/// Appends tracks to a playlist.
///
/// The remote service does not deduplicate; adding a URI that is already
/// present simply appends another occurrence. Duplicate prevention is a local
/// policy enforced by the playlist library before this call is made.
pub async fn add_tracks(
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, ApiError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = AddTracksRequest {
        uris: uris.to_vec(),
    };

    let response = send_checked(client.post(&api_url).bearer_auth(token).json(&body)).await?;
    decode_json(response).await
}

/// Removes all occurrences of each given URI from a playlist.
pub async fn remove_tracks(
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, ApiError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = RemoveTracksRequest {
        tracks: uris
            .iter()
            .map(|uri| TrackUriRef { uri: uri.clone() })
            .collect(),
    };

    let response = send_checked(client.delete(&api_url).bearer_auth(token).json(&body)).await?;
    decode_json(response).await
}

/// Moves exactly one track to a new position.
///
/// `insert_before` is evaluated against the sequence after the moved item is
/// conceptually removed, which is why a one-slot downward move needs an
/// insertion point two past the current position.
pub async fn reorder_tracks(
    token: &str,
    playlist_id: &str,
    range_start: usize,
    insert_before: usize,
) -> Result<SnapshotResponse, ApiError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = ReorderTracksRequest {
        range_start,
        insert_before,
        range_length: 1,
    };

    let response = send_checked(client.put(&api_url).bearer_auth(token).json(&body)).await?;
    decode_json(response).await
}

/// Renames a playlist. Partial update, the description is left untouched.
pub async fn rename(token: &str, playlist_id: &str, name: &str) -> Result<(), ApiError> {
    change_details(token, playlist_id, json!({ "name": name })).await
}

/// Replaces a playlist description. Partial update, the name is left untouched.
pub async fn describe(token: &str, playlist_id: &str, description: &str) -> Result<(), ApiError> {
    change_details(token, playlist_id, json!({ "description": description })).await
}

async fn change_details(
    token: &str,
    playlist_id: &str,
    body: serde_json::Value,
) -> Result<(), ApiError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    send_checked(client.put(&api_url).bearer_auth(token).json(&body)).await?;
    Ok(())
}

/// Unfollows a playlist, removing it from the user's library.
///
/// Idempotent at the protocol level: unfollowing twice is a no-op, so callers
/// should treat a `NotFound` here as already done rather than as a failure.
pub async fn unfollow(token: &str, playlist_id: &str) -> Result<(), ApiError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}/followers",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    send_checked(client.delete(&api_url).bearer_auth(token)).await?;
    Ok(())
}

/// Fetches a full playlist snapshot.
///
/// The returned track order is authoritative; the playlist library re-reads
/// it after reorders instead of trusting a speculative local shuffle.
pub async fn get(token: &str, playlist_id: &str) -> Result<PlaylistResponse, ApiError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let response = send_checked(client.get(&api_url).bearer_auth(token)).await?;
    decode_json(response).await
}

/// Lists the authenticated user's playlists, one page at a time.
pub async fn list_mine(
    token: &str,
    limit: u32,
    offset: u32,
) -> Result<UserPlaylistsResponse, ApiError> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/me/playlists?limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        limit = limit,
        offset = offset
    );

    let response = send_checked(client.get(&api_url).bearer_auth(token)).await?;
    decode_json(response).await
}
