use reqwest::Client;

use crate::{
    config,
    error::ApiError,
    spotify::{decode_json, send_checked},
    types::UserProfileResponse,
};

/// Retrieves the profile of the authenticated user.
///
/// Used once after authentication to obtain the acting user's id, which the
/// create-playlist endpoint needs in its path.
pub async fn current_user(token: &str) -> Result<UserProfileResponse, ApiError> {
    let client = Client::new();
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let response = send_checked(client.get(&api_url).bearer_auth(token)).await?;
    decode_json(response).await
}
