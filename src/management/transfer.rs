use crate::{
    error::LibraryError,
    management::PlaylistLibrary,
    spotify::CatalogApi,
    types::{Playlist, PlaylistDocument, PlaylistRecord, Track, TrackRecord},
};

/// Serializes the current selection (or the whole collection when nothing is
/// selected) into a portable document. Pure projection, no remote calls.
pub fn export_document(library: &PlaylistLibrary) -> PlaylistDocument {
    let playlists = library
        .selection_snapshot()
        .into_iter()
        .map(|p| PlaylistRecord {
            name: p.name.clone(),
            description: p.description.clone(),
            tracks: p
                .tracks
                .iter()
                .map(|t| TrackRecord {
                    id: t.id.clone(),
                    name: t.name.clone(),
                    artists: t.artists.clone(),
                    uri: t.uri.clone(),
                })
                .collect(),
        })
        .collect();

    PlaylistDocument { playlists }
}

/// Replays a document as remote state: per record one create-playlist call,
/// then (when the record has tracks) one add-tracks call carrying the entire
/// URI list. Records are processed sequentially; order determines the final
/// collection order and keeps the request volume friendly to rate limits.
///
/// Each record lands in the local collection as soon as its own create+add
/// pair succeeded. The first failure aborts the remaining records with
/// `ImportFailed`; playlists imported before the failure remain, both
/// locally and remotely. Import is not transactional.
///
/// Returns the number of playlists imported.
pub async fn import_document<C: CatalogApi>(
    api: &C,
    token: &str,
    library: &mut PlaylistLibrary,
    document: PlaylistDocument,
) -> Result<usize, LibraryError> {
    let user_id = library
        .ensure_user(api, token)
        .await
        .map_err(|e| LibraryError::ImportFailed(e.to_string()))?;

    let total = document.playlists.len();
    let mut imported = 0usize;

    for record in document.playlists {
        let created = match api
            .create_playlist(token, &user_id, &record.name, &record.description)
            .await
        {
            Ok(created) => created,
            Err(e) => {
                return Err(LibraryError::ImportFailed(format!(
                    "imported {} of {} playlists, then create failed for '{}': {}",
                    imported, total, record.name, e
                )));
            }
        };

        if !record.tracks.is_empty() {
            let uris: Vec<String> = record.tracks.iter().map(|t| t.uri.clone()).collect();
            if let Err(e) = api.add_tracks(token, &created.id, &uris).await {
                return Err(LibraryError::ImportFailed(format!(
                    "imported {} of {} playlists, then adding tracks to '{}' failed: {}",
                    imported, total, record.name, e
                )));
            }
        }

        library.adopt(Playlist {
            id: created.id,
            name: record.name,
            description: record.description,
            public: false,
            tracks: record
                .tracks
                .into_iter()
                .map(|t| Track {
                    id: t.id,
                    name: t.name,
                    artists: t.artists,
                    uri: t.uri,
                })
                .collect(),
        });
        imported += 1;
    }

    Ok(imported)
}
