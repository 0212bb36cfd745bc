use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A catalog track as held inside a playlist snapshot.
///
/// Tracks are shared by value: the same track appearing in two playlists is
/// two independent copies, duplication across playlists is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub uri: String,
}

impl Track {
    /// Builds a placeholder track from a playable resource URI. The catalog id
    /// is the opaque tail of the URI; name and artists stay empty until the
    /// next snapshot refresh fills them in.
    pub fn from_uri(uri: &str, id: &str) -> Self {
        Track {
            id: id.to_string(),
            name: String::new(),
            artists: Vec::new(),
            uri: uri.to_string(),
        }
    }
}

/// A remote-backed playlist snapshot. Track order is playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub tracks: Vec<Track>,
}

/// An album search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumHit {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
}

/// An artist search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistHit {
    pub id: String,
    pub name: String,
}

/// Aggregated result of one search: three independent ordered categories,
/// each in the remote ranking order, plus one warning per failed branch.
/// Replaced wholesale on every search.
#[derive(Debug, Clone, Default)]
pub struct SearchResultSet {
    pub tracks: Vec<Track>,
    pub albums: Vec<AlbumHit>,
    pub artists: Vec<ArtistHit>,
    pub warnings: Vec<String>,
}

/// Direction of a single-slot track move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Per-id outcome of a bulk delete over the current selection.
#[derive(Debug, Clone, Default)]
pub struct BulkDeleteOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, crate::error::ApiError)>,
}

// --- portable export document --------------------------------------------

/// Self-describing export of a playlist collection (or a selected subset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    pub playlists: Vec<PlaylistRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub name: String,
    pub description: String,
    pub tracks: Vec<TrackRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub uri: String,
}

// --- Spotify wire types ---------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUriRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUriRef {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderTracksRequest {
    pub range_start: usize,
    pub insert_before: usize,
    pub range_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    pub tracks: PlaylistTracksContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksContainer {
    pub items: Vec<PlaylistTrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    // The API reports null for removed or locally unavailable tracks.
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylistsResponse {
    pub items: Vec<PlaylistSummary>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<TrackPage>,
    pub albums: Option<AlbumPage>,
    pub artists: Option<ArtistPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumPage {
    pub items: Vec<AlbumObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistPage {
    pub items: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
}

impl From<TrackObject> for Track {
    fn from(t: TrackObject) -> Self {
        Track {
            // Local tracks have no catalog id; fall back to the URI so the
            // dedup key stays unique.
            id: t.id.unwrap_or_else(|| t.uri.clone()),
            name: t.name,
            artists: t.artists.into_iter().map(|a| a.name).collect(),
            uri: t.uri,
        }
    }
}

impl From<PlaylistResponse> for Playlist {
    fn from(p: PlaylistResponse) -> Self {
        Playlist {
            id: p.id,
            name: p.name,
            description: p.description.unwrap_or_default(),
            public: p.public.unwrap_or(false),
            tracks: p
                .tracks
                .items
                .into_iter()
                .filter_map(|item| item.track)
                .map(Track::from)
                .collect(),
        }
    }
}

// --- table rows -----------------------------------------------------------

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub selected: String,
    pub id: String,
    pub name: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub position: usize,
    pub name: String,
    pub artists: String,
    pub uri: String,
}

#[derive(Tabled)]
pub struct SearchTableRow {
    pub kind: String,
    pub name: String,
    pub artists: String,
    pub id: String,
}
