//! Error classification for remote calls and playlist operations.
//!
//! Remote failures are classified once, at the HTTP boundary, into [`ApiError`]
//! variants; everything above the `spotify` module works with those variants
//! instead of raw status codes. Local policy rejections (blank names, duplicate
//! tracks, out-of-range moves) never reach the network and are reported through
//! [`LibraryError`] without an `Api` wrapper.

use std::fmt;

use reqwest::StatusCode;

/// A classified failure from a single Spotify Web API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The bearer token was rejected. Equivalent to credential expiry; the
    /// caller should prompt for re-authentication instead of retrying.
    Unauthorized,
    /// The addressed resource does not exist (or is not visible to the user).
    NotFound,
    /// 429 from the API, with the Retry-After value when the header was
    /// present and parseable. No waiting happens here; retry policy belongs
    /// to the caller.
    RateLimited(Option<u64>),
    /// Any other 4xx/5xx the API answered with.
    Invalid(String),
    /// The request never produced an HTTP response (DNS, connect, TLS, ...).
    Unreachable(String),
}

impl ApiError {
    /// Maps an HTTP status to its classification.
    pub fn from_status(status: StatusCode, retry_after: Option<u64>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(retry_after),
            other => ApiError::Invalid(format!("unexpected status {}", other)),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "unauthorized (token expired or revoked)"),
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::RateLimited(Some(secs)) => {
                write!(f, "rate limited, retry after {} seconds", secs)
            }
            ApiError::RateLimited(None) => write!(f, "rate limited"),
            ApiError::Invalid(msg) => write!(f, "invalid request: {}", msg),
            ApiError::Unreachable(msg) => write!(f, "service unreachable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::from_status(status, None),
            None => ApiError::Unreachable(err.to_string()),
        }
    }
}

/// Failure taxonomy for playlist library operations.
///
/// `Validation`, `DuplicateTrack`, `OutOfRange`, `NotFound` and `EmptyQuery`
/// are local rejections raised before any request is sent; `Api` carries a
/// classified remote failure; `ImportFailed` summarizes an aborted import
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Bad local input, e.g. a blank playlist name.
    Validation(String),
    /// The track is already present in the target playlist.
    DuplicateTrack,
    /// A reorder target index fell outside the playlist bounds.
    OutOfRange,
    /// No playlist (or track) with the given id in the local collection.
    NotFound(String),
    /// A search query that is blank after trimming.
    EmptyQuery,
    /// A remote call failed; local state was left untouched.
    Api(ApiError),
    /// A bulk import aborted part-way through; playlists created before the
    /// failure remain both locally and remotely.
    ImportFailed(String),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Validation(msg) => write!(f, "validation failed: {}", msg),
            LibraryError::DuplicateTrack => write!(f, "track already exists in the playlist"),
            LibraryError::OutOfRange => write!(f, "move target is out of range"),
            LibraryError::NotFound(what) => write!(f, "not found: {}", what),
            LibraryError::EmptyQuery => write!(f, "search query is empty"),
            LibraryError::Api(err) => write!(f, "{}", err),
            LibraryError::ImportFailed(msg) => write!(
                f,
                "import failed: {} (if your session expired, run auth and retry)",
                msg
            ),
        }
    }
}

impl std::error::Error for LibraryError {}

impl From<ApiError> for LibraryError {
    fn from(err: ApiError) -> Self {
        LibraryError::Api(err)
    }
}
