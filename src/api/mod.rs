//! # API Module
//!
//! HTTP endpoints for the local callback server used during authentication.
//!
//! - [`callback`] - Completes the OAuth 2.0 PKCE flow by exchanging the
//!   authorization code Spotify redirects back with for an access token.
//! - [`health`] - Health check returning application status and version.
//!
//! Both endpoints are plain [axum](https://docs.rs/axum) handlers wired up by
//! [`crate::server::start_api_server`]. The callback shares its PKCE state
//! with the auth flow through an `Arc<Mutex<Option<PkceToken>>>` extension.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
