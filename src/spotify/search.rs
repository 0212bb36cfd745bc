use reqwest::Client;

use crate::{
    config,
    error::ApiError,
    spotify::{decode_json, send_checked},
    types::SearchResponse,
};
use crate::utils::SearchKind;

/// Searches the catalog for one result category.
///
/// Issues a single `GET /search` request for the given kind. The response
/// carries results in the remote ranking order; callers must not resort them.
/// Category fields for kinds that were not requested come back as `None`.
pub async fn search(
    token: &str,
    query: &str,
    kind: SearchKind,
    limit: u32,
) -> Result<SearchResponse, ApiError> {
    let client = Client::new();
    let api_url = format!("{uri}/search", uri = &config::spotify_apiurl());

    let response = send_checked(
        client
            .get(&api_url)
            .query(&[
                ("q", query),
                ("type", &kind.to_string()),
                ("limit", &limit.to_string()),
            ])
            .bearer_auth(token),
    )
    .await?;

    decode_json(response).await
}
