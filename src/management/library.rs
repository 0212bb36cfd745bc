use std::{collections::BTreeSet, path::PathBuf};

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, LibraryError},
    spotify::CatalogApi,
    types::{BulkDeleteOutcome, MoveDirection, Playlist, Track},
};

/// The local, optimistically-read view of the user's playlists, kept
/// consistent with the remote catalog by the reconciliation discipline:
/// every mutating operation performs its remote call first and commits the
/// local change only on remote success. A failed remote call leaves the
/// collection exactly as it was and surfaces a classified error.
///
/// The collection is insertion-ordered (display order); the selection set
/// only ever references playlists that are currently in the collection,
/// deletion purges both structures in the same handler.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlaylistLibrary {
    playlists: Vec<Playlist>,
    selected: BTreeSet<String>,
    user_id: Option<String>,
}

impl PlaylistLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the cached library snapshot, falling back to an empty one when
    /// no cache exists yet.
    pub async fn load() -> Self {
        let path = Self::cache_path();
        match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn get(&self, playlist_id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == playlist_id)
    }

    pub fn is_selected(&self, playlist_id: &str) -> bool {
        self.selected.contains(playlist_id)
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// The export subject: the selected playlists in collection order, or
    /// every playlist when the selection is empty.
    pub fn selection_snapshot(&self) -> Vec<&Playlist> {
        if self.selected.is_empty() {
            self.playlists.iter().collect()
        } else {
            self.playlists
                .iter()
                .filter(|p| self.selected.contains(&p.id))
                .collect()
        }
    }

    /// Returns the acting user's id, fetching and caching it on first use.
    pub async fn ensure_user<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
    ) -> Result<String, LibraryError> {
        if let Some(id) = &self.user_id {
            return Ok(id.clone());
        }
        let profile = api.current_user(token).await?;
        self.user_id = Some(profile.id.clone());
        Ok(profile.id)
    }

    /// Creates a playlist remotely and, on success, appends its snapshot at
    /// the end of the collection. Returns the catalog-assigned id.
    pub async fn create_playlist<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
        name: &str,
        description: &str,
    ) -> Result<String, LibraryError> {
        if name.trim().is_empty() {
            return Err(LibraryError::Validation(
                "playlist name must not be blank".to_string(),
            ));
        }

        let user_id = self.ensure_user(api, token).await?;
        let created = api
            .create_playlist(token, &user_id, name, description)
            .await?;

        self.playlists.push(Playlist {
            id: created.id.clone(),
            name: name.to_string(),
            description: description.to_string(),
            public: false,
            tracks: Vec::new(),
        });

        Ok(created.id)
    }

    /// Appends a track to a playlist.
    ///
    /// Duplicate identities are rejected locally before any remote call is
    /// attempted; the remote service would happily append a second
    /// occurrence. On remote success the track is tail-inserted, matching
    /// the API's append-on-add behavior.
    pub async fn add_track<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
        playlist_id: &str,
        track: Track,
    ) -> Result<(), LibraryError> {
        let index = self.position(playlist_id)?;
        if self.playlists[index].tracks.iter().any(|t| t.id == track.id) {
            return Err(LibraryError::DuplicateTrack);
        }

        api.add_tracks(token, playlist_id, &[track.uri.clone()])
            .await?;

        self.playlists[index].tracks.push(track);
        Ok(())
    }

    /// Removes a track from a playlist: remote removal first, local filter
    /// only once the remote call confirmed.
    pub async fn remove_track<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<(), LibraryError> {
        let index = self.position(playlist_id)?;
        let uri = self.playlists[index]
            .tracks
            .iter()
            .find(|t| t.id == track_id)
            .map(|t| t.uri.clone())
            .ok_or_else(|| LibraryError::NotFound(format!("track {}", track_id)))?;

        api.remove_tracks(token, playlist_id, &[uri]).await?;

        self.playlists[index].tracks.retain(|t| t.id != track_id);
        Ok(())
    }

    /// Moves the track at `from_index` one slot up or down.
    ///
    /// The remote range-move evaluates `insert_before` against the sequence
    /// after the moved item is conceptually removed, so a one-slot downward
    /// move needs an insertion point two past the current position. On
    /// success the snapshot is re-fetched rather than shuffled locally; the
    /// remote order is authoritative.
    pub async fn reorder_track<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
        playlist_id: &str,
        from_index: usize,
        direction: MoveDirection,
    ) -> Result<(), LibraryError> {
        let index = self.position(playlist_id)?;
        let len = self.playlists[index].tracks.len();
        if from_index >= len {
            return Err(LibraryError::OutOfRange);
        }

        let target = match direction {
            MoveDirection::Up => from_index as isize - 1,
            MoveDirection::Down => from_index as isize + 2,
        };
        if target < 0 || target > len as isize {
            return Err(LibraryError::OutOfRange);
        }

        api.reorder_tracks(token, playlist_id, from_index, target as usize)
            .await?;

        self.refresh_playlist(api, token, playlist_id).await
    }

    /// Renames a playlist; the local name changes only on remote success.
    pub async fn rename_playlist<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
        playlist_id: &str,
        name: &str,
    ) -> Result<(), LibraryError> {
        if name.trim().is_empty() {
            return Err(LibraryError::Validation(
                "playlist name must not be blank".to_string(),
            ));
        }
        let index = self.position(playlist_id)?;

        api.rename_playlist(token, playlist_id, name).await?;

        self.playlists[index].name = name.to_string();
        Ok(())
    }

    /// Replaces a playlist description; local state changes only on remote
    /// success.
    pub async fn redescribe_playlist<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
        playlist_id: &str,
        description: &str,
    ) -> Result<(), LibraryError> {
        let index = self.position(playlist_id)?;

        api.describe_playlist(token, playlist_id, description).await?;

        self.playlists[index].description = description.to_string();
        Ok(())
    }

    /// Toggles a playlist in or out of the bulk selection. Returns whether
    /// the playlist is selected afterwards.
    pub fn toggle_select(&mut self, playlist_id: &str) -> Result<bool, LibraryError> {
        self.position(playlist_id)?;
        if self.selected.remove(playlist_id) {
            Ok(false)
        } else {
            self.selected.insert(playlist_id.to_string());
            Ok(true)
        }
    }

    /// Deletes (unfollows) every selected playlist, issuing the remote
    /// deletes concurrently and awaiting them all.
    pub async fn delete_selected<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
    ) -> BulkDeleteOutcome {
        let ids = self.selected_ids();
        self.delete_playlists(api, token, &ids).await
    }

    /// Deletes (unfollows) exactly the given playlists, issuing the remote
    /// deletes concurrently and awaiting them all. Playlists outside the
    /// given ids are untouched, selected or not.
    ///
    /// Partial failure across the batch is expected and reported per id: a
    /// playlist is evicted from the collection and the selection only when
    /// its own delete succeeded; failing ids stay selected and present. A
    /// `NotFound` counts as success since unfollowing twice is a no-op.
    pub async fn delete_playlists<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
        ids: &[String],
    ) -> BulkDeleteOutcome {
        let deletions = ids.iter().map(|id| async move {
            let result = api.delete_playlist(token, id).await;
            (id.clone(), result)
        });
        let results = join_all(deletions).await;

        let mut outcome = BulkDeleteOutcome::default();
        for (id, result) in results {
            match result {
                Ok(()) | Err(ApiError::NotFound) => {
                    self.playlists.retain(|p| p.id != id);
                    self.selected.remove(&id);
                    outcome.deleted.push(id);
                }
                Err(e) => outcome.failed.push((id, e)),
            }
        }
        outcome
    }

    /// Replaces one playlist snapshot with the authoritative remote state.
    pub async fn refresh_playlist<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
        playlist_id: &str,
    ) -> Result<(), LibraryError> {
        let index = self.position(playlist_id)?;
        let fetched = api.get_playlist(token, playlist_id).await?;
        self.playlists[index] = Playlist::from(fetched);
        Ok(())
    }

    /// Adopts a remote-backed snapshot created outside the normal operation
    /// path (import, sync) at the end of the collection.
    pub fn adopt(&mut self, playlist: Playlist) {
        self.playlists.retain(|p| p.id != playlist.id);
        self.playlists.push(playlist);
    }

    /// Rebuilds the whole collection from the remote side: pages through the
    /// user's playlists and fetches each full snapshot. Selection entries for
    /// playlists that no longer exist remotely are dropped.
    pub async fn sync<C: CatalogApi>(
        &mut self,
        api: &C,
        token: &str,
    ) -> Result<usize, LibraryError> {
        let mut summaries = Vec::new();
        let mut offset = 0u32;
        loop {
            let page = api.list_playlists(token, 50, offset).await?;
            let fetched = page.items.len() as u32;
            summaries.extend(page.items);
            if page.next.is_none() || fetched == 0 {
                break;
            }
            offset += fetched;
        }

        let mut playlists = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let fetched = api.get_playlist(token, &summary.id).await?;
            playlists.push(Playlist::from(fetched));
        }

        let live: BTreeSet<String> = playlists.iter().map(|p| p.id.clone()).collect();
        self.selected.retain(|id| live.contains(id));
        let count = playlists.len();
        self.playlists = playlists;
        Ok(count)
    }

    fn position(&self, playlist_id: &str) -> Result<usize, LibraryError> {
        self.playlists
            .iter()
            .position(|p| p.id == playlist_id)
            .ok_or_else(|| LibraryError::NotFound(format!("playlist {}", playlist_id)))
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spplcli/cache/library.json");
        path
    }
}
