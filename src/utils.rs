use std::collections::BTreeSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// A playable resource kind as it appears in a Spotify URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Track,
    Episode,
}

/// Validates a playable resource URI of the form
/// `spotify:(track|episode):<opaque-id>` and returns its kind and opaque id.
///
/// The opaque id must be non-empty and consist of word characters only; the
/// URI structure itself is never interpreted beyond this gate.
pub fn parse_resource_uri(uri: &str) -> Result<(ResourceKind, &str), String> {
    let mut parts = uri.split(':');
    let scheme = parts.next().unwrap_or_default();
    let kind = parts.next().unwrap_or_default();
    let id = parts.next().unwrap_or_default();

    if scheme != "spotify" || parts.next().is_some() {
        return Err(format!("invalid resource URI '{}'", uri));
    }
    let kind = match kind {
        "track" => ResourceKind::Track,
        "episode" => ResourceKind::Episode,
        other => return Err(format!("unsupported resource kind '{}'", other)),
    };
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("invalid resource id in '{}'", uri));
    }

    Ok((kind, id))
}

/// One concrete search category of the Spotify `/search` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SearchKind {
    Track,
    Album,
    Artist,
}

impl SearchKind {
    pub const ALL: [SearchKind; 3] = [SearchKind::Track, SearchKind::Album, SearchKind::Artist];
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
            SearchKind::Artist => "artist",
        };
        write!(f, "{}", s)
    }
}

/// The set of search categories resolved from a CLI `--kind` value. `all`
/// expands to every concrete kind; duplicates collapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKinds(pub BTreeSet<SearchKind>);

impl SearchKinds {
    pub fn iter(&self) -> impl Iterator<Item = SearchKind> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, kind: SearchKind) -> bool {
        self.0.contains(&kind)
    }
}

impl Default for SearchKinds {
    fn default() -> Self {
        SearchKinds(BTreeSet::from(SearchKind::ALL))
    }
}

impl std::fmt::Display for SearchKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}", joined)
    }
}

/// Parses a comma-separated list of search kinds, e.g. `track,album`.
/// Suitable as a clap value parser.
pub fn parse_search_kinds(s: &str) -> Result<SearchKinds, String> {
    if s.trim().is_empty() {
        return Err("search kind cannot be empty".to_string());
    }

    let mut set = BTreeSet::new();
    for segment in s.split(',') {
        let segment = segment.trim().to_lowercase();
        if segment.is_empty() {
            return Err("empty segment in search kind list".to_string());
        }
        match segment.as_str() {
            "track" => {
                set.insert(SearchKind::Track);
            }
            "album" => {
                set.insert(SearchKind::Album);
            }
            "artist" => {
                set.insert(SearchKind::Artist);
            }
            "all" => {
                set.extend(SearchKind::ALL);
            }
            other => return Err(format!("invalid value '{}' for search kind", other)),
        }
    }

    Ok(SearchKinds(set))
}

/// Parses a track move direction (`up` or `down`). Suitable as a clap value
/// parser.
pub fn parse_move_direction(s: &str) -> Result<crate::types::MoveDirection, String> {
    match s.trim().to_lowercase().as_str() {
        "up" => Ok(crate::types::MoveDirection::Up),
        "down" => Ok(crate::types::MoveDirection::Down),
        other => Err(format!("invalid value '{}' for direction", other)),
    }
}
