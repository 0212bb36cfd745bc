use crate::{
    error::LibraryError,
    spotify::CatalogApi,
    types::{AlbumHit, ArtistHit, SearchResultSet, Track},
    utils::{SearchKind, SearchKinds},
};

/// Fixed page size per result category.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Fans one query out to the requested per-kind searches, concurrently, and
/// merges the branches into a single result set.
///
/// A blank query (after trimming) is rejected with `EmptyQuery` before any
/// remote call. Each branch tolerates failure independently: a failed branch
/// contributes an empty category plus a warning, it never aborts its
/// siblings. Category contents keep the remote ranking order.
pub async fn aggregate_search<C: CatalogApi>(
    api: &C,
    token: &str,
    query: &str,
    kinds: &SearchKinds,
) -> Result<SearchResultSet, LibraryError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LibraryError::EmptyQuery);
    }

    let track_branch = async {
        if kinds.contains(SearchKind::Track) {
            Some(api.search(token, query, SearchKind::Track, SEARCH_PAGE_SIZE).await)
        } else {
            None
        }
    };
    let album_branch = async {
        if kinds.contains(SearchKind::Album) {
            Some(api.search(token, query, SearchKind::Album, SEARCH_PAGE_SIZE).await)
        } else {
            None
        }
    };
    let artist_branch = async {
        if kinds.contains(SearchKind::Artist) {
            Some(api.search(token, query, SearchKind::Artist, SEARCH_PAGE_SIZE).await)
        } else {
            None
        }
    };

    let (tracks, albums, artists) = tokio::join!(track_branch, album_branch, artist_branch);

    let mut results = SearchResultSet::default();

    match tracks {
        Some(Ok(response)) => {
            results.tracks = response
                .tracks
                .map(|page| page.items.into_iter().map(Track::from).collect())
                .unwrap_or_default();
        }
        Some(Err(e)) => results.warnings.push(format!("track search failed: {}", e)),
        None => {}
    }

    match albums {
        Some(Ok(response)) => {
            results.albums = response
                .albums
                .map(|page| {
                    page.items
                        .into_iter()
                        .map(|a| AlbumHit {
                            id: a.id,
                            name: a.name,
                            artists: a.artists.into_iter().map(|ar| ar.name).collect(),
                        })
                        .collect()
                })
                .unwrap_or_default();
        }
        Some(Err(e)) => results.warnings.push(format!("album search failed: {}", e)),
        None => {}
    }

    match artists {
        Some(Ok(response)) => {
            results.artists = response
                .artists
                .map(|page| {
                    page.items
                        .into_iter()
                        .map(|a| ArtistHit {
                            id: a.id,
                            name: a.name,
                        })
                        .collect()
                })
                .unwrap_or_default();
        }
        Some(Err(e)) => results
            .warnings
            .push(format!("artist search failed: {}", e)),
        None => {}
    }

    Ok(results)
}
