#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap};

use spplcli::error::ApiError;
use spplcli::spotify::CatalogApi;
use spplcli::types::{
    AlbumObject, AlbumPage, ArtistObject, ArtistPage, ArtistRef, CreatePlaylistResponse, Playlist,
    PlaylistResponse, PlaylistSummary, PlaylistTrackItem, PlaylistTracksContainer, SearchResponse,
    Track, TrackObject, TrackPage, UserPlaylistsResponse, UserProfileResponse,
};
use spplcli::utils::SearchKind;

/// One recorded remote call, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CurrentUser,
    Search { query: String, kind: String },
    Create { user: String, name: String, description: String },
    AddTracks { playlist: String, uris: Vec<String> },
    RemoveTracks { playlist: String, uris: Vec<String> },
    Reorder { playlist: String, range_start: usize, insert_before: usize },
    Rename { playlist: String, name: String },
    Describe { playlist: String, description: String },
    Delete { playlist: String },
    GetPlaylist { playlist: String },
    ListPlaylists { offset: u32 },
}

/// A scripted catalog: records every call and fails operations on demand.
///
/// Failures are keyed by operation name (`"add_tracks"`) or by operation
/// plus target (`"delete:p2"`, `"create:Name"`); the more specific key wins
/// only in the sense that either match triggers the failure.
#[derive(Default)]
pub struct MockCatalog {
    failures: RefCell<HashMap<String, ApiError>>,
    calls: RefCell<Vec<Call>>,
    playlists: RefCell<HashMap<String, PlaylistResponse>>,
    summaries: RefCell<Vec<PlaylistSummary>>,
    next_id: RefCell<usize>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, key: &str, err: ApiError) {
        self.failures.borrow_mut().insert(key.to_string(), err);
    }

    /// Installs a snapshot served by `get_playlist`.
    pub fn serve_playlist(&self, response: PlaylistResponse) {
        self.playlists
            .borrow_mut()
            .insert(response.id.clone(), response);
    }

    /// Installs the page served by `list_playlists`.
    pub fn serve_summaries(&self, summaries: Vec<PlaylistSummary>) {
        *self.summaries.borrow_mut() = summaries;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn check(&self, keys: &[String]) -> Result<(), ApiError> {
        let failures = self.failures.borrow();
        match keys.iter().find_map(|k| failures.get(k)) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl CatalogApi for MockCatalog {
    async fn current_user(&self, _token: &str) -> Result<UserProfileResponse, ApiError> {
        self.record(Call::CurrentUser);
        self.check(&["current_user".to_string()])?;
        Ok(UserProfileResponse {
            id: "user1".to_string(),
            display_name: Some("Test User".to_string()),
        })
    }

    async fn search(
        &self,
        _token: &str,
        query: &str,
        kind: SearchKind,
        _limit: u32,
    ) -> Result<SearchResponse, ApiError> {
        self.record(Call::Search {
            query: query.to_string(),
            kind: kind.to_string(),
        });
        self.check(&["search".to_string(), format!("search:{}", kind)])?;

        let mut response = SearchResponse {
            tracks: None,
            albums: None,
            artists: None,
        };
        match kind {
            SearchKind::Track => {
                response.tracks = Some(TrackPage {
                    items: (0..2)
                        .map(|n| TrackObject {
                            id: Some(format!("t{}", n)),
                            name: format!("{} track {}", query, n),
                            uri: format!("spotify:track:t{}", n),
                            artists: vec![ArtistRef {
                                name: "Someone".to_string(),
                            }],
                        })
                        .collect(),
                });
            }
            SearchKind::Album => {
                response.albums = Some(AlbumPage {
                    items: (0..2)
                        .map(|n| AlbumObject {
                            id: format!("al{}", n),
                            name: format!("{} album {}", query, n),
                            artists: vec![ArtistRef {
                                name: "Someone".to_string(),
                            }],
                        })
                        .collect(),
                });
            }
            SearchKind::Artist => {
                response.artists = Some(ArtistPage {
                    items: (0..2)
                        .map(|n| ArtistObject {
                            id: format!("ar{}", n),
                            name: format!("{} artist {}", query, n),
                        })
                        .collect(),
                });
            }
        }
        Ok(response)
    }

    async fn create_playlist(
        &self,
        _token: &str,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatePlaylistResponse, ApiError> {
        self.record(Call::Create {
            user: user_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        });
        self.check(&["create".to_string(), format!("create:{}", name)])?;

        let mut next = self.next_id.borrow_mut();
        *next += 1;
        Ok(CreatePlaylistResponse {
            id: format!("pl{}", next),
            name: name.to_string(),
            description: Some(description.to_string()),
        })
    }

    async fn add_tracks(
        &self,
        _token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError> {
        self.record(Call::AddTracks {
            playlist: playlist_id.to_string(),
            uris: uris.to_vec(),
        });
        self.check(&[
            "add_tracks".to_string(),
            format!("add_tracks:{}", playlist_id),
        ])
    }

    async fn remove_tracks(
        &self,
        _token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError> {
        self.record(Call::RemoveTracks {
            playlist: playlist_id.to_string(),
            uris: uris.to_vec(),
        });
        self.check(&[
            "remove_tracks".to_string(),
            format!("remove_tracks:{}", playlist_id),
        ])
    }

    async fn reorder_tracks(
        &self,
        _token: &str,
        playlist_id: &str,
        range_start: usize,
        insert_before: usize,
    ) -> Result<(), ApiError> {
        self.record(Call::Reorder {
            playlist: playlist_id.to_string(),
            range_start,
            insert_before,
        });
        self.check(&["reorder".to_string(), format!("reorder:{}", playlist_id)])
    }

    async fn rename_playlist(
        &self,
        _token: &str,
        playlist_id: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        self.record(Call::Rename {
            playlist: playlist_id.to_string(),
            name: name.to_string(),
        });
        self.check(&["rename".to_string(), format!("rename:{}", playlist_id)])
    }

    async fn describe_playlist(
        &self,
        _token: &str,
        playlist_id: &str,
        description: &str,
    ) -> Result<(), ApiError> {
        self.record(Call::Describe {
            playlist: playlist_id.to_string(),
            description: description.to_string(),
        });
        self.check(&["describe".to_string(), format!("describe:{}", playlist_id)])
    }

    async fn delete_playlist(&self, _token: &str, playlist_id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete {
            playlist: playlist_id.to_string(),
        });
        self.check(&["delete".to_string(), format!("delete:{}", playlist_id)])
    }

    async fn get_playlist(
        &self,
        _token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse, ApiError> {
        self.record(Call::GetPlaylist {
            playlist: playlist_id.to_string(),
        });
        self.check(&[
            "get_playlist".to_string(),
            format!("get_playlist:{}", playlist_id),
        ])?;

        self.playlists
            .borrow()
            .get(playlist_id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn list_playlists(
        &self,
        _token: &str,
        _limit: u32,
        offset: u32,
    ) -> Result<UserPlaylistsResponse, ApiError> {
        self.record(Call::ListPlaylists { offset });
        self.check(&["list_playlists".to_string()])?;

        Ok(UserPlaylistsResponse {
            items: self.summaries.borrow().clone(),
            next: None,
        })
    }
}

// Helper functions to build test data.

pub fn test_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        artists: vec!["Artist A".to_string()],
        uri: format!("spotify:track:{}", id),
    }
}

pub fn test_playlist(id: &str, name: &str, tracks: Vec<Track>) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        public: false,
        tracks,
    }
}

pub fn playlist_response(id: &str, name: &str, tracks: &[Track]) -> PlaylistResponse {
    PlaylistResponse {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(String::new()),
        public: Some(false),
        tracks: PlaylistTracksContainer {
            items: tracks
                .iter()
                .map(|t| PlaylistTrackItem {
                    track: Some(TrackObject {
                        id: Some(t.id.clone()),
                        name: t.name.clone(),
                        uri: t.uri.clone(),
                        artists: t
                            .artists
                            .iter()
                            .map(|a| ArtistRef { name: a.clone() })
                            .collect(),
                    }),
                })
                .collect(),
        },
    }
}
