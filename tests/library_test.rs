mod common;

use common::{Call, MockCatalog, playlist_response, test_playlist, test_track};
use spplcli::error::{ApiError, LibraryError};
use spplcli::management::PlaylistLibrary;
use spplcli::types::MoveDirection;

#[tokio::test]
async fn create_playlist_appends_on_remote_success() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();

    let id = library
        .create_playlist(&api, "token", "Morning Mix", "coffee tunes")
        .await
        .unwrap();

    assert_eq!(id, "pl1");
    assert_eq!(library.playlists().len(), 1);
    let created = library.get(&id).unwrap();
    assert_eq!(created.name, "Morning Mix");
    assert_eq!(created.description, "coffee tunes");
    assert!(created.tracks.is_empty());
    assert!(!created.public);
    assert_eq!(
        api.calls(),
        vec![
            Call::CurrentUser,
            Call::Create {
                user: "user1".to_string(),
                name: "Morning Mix".to_string(),
                description: "coffee tunes".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn create_playlist_rejects_blank_name_without_remote_call() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();

    let result = library.create_playlist(&api, "token", "   ", "desc").await;

    assert!(matches!(result, Err(LibraryError::Validation(_))));
    assert_eq!(library.playlists().len(), 0);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn create_playlist_failure_leaves_collection_unchanged() {
    let api = MockCatalog::new();
    api.fail_with("create", ApiError::Unreachable("connection refused".to_string()));
    let mut library = PlaylistLibrary::new();

    let result = library.create_playlist(&api, "token", "Mix", "").await;

    assert!(matches!(
        result,
        Err(LibraryError::Api(ApiError::Unreachable(_)))
    ));
    assert_eq!(library.playlists().len(), 0);
}

#[tokio::test]
async fn add_track_appends_at_tail() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("p1", "Mix", vec![test_track("a")]));

    library
        .add_track(&api, "token", "p1", test_track("b"))
        .await
        .unwrap();

    let tracks = &library.get("p1").unwrap().tracks;
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[1].id, "b");
    assert_eq!(
        api.calls(),
        vec![Call::AddTracks {
            playlist: "p1".to_string(),
            uris: vec!["spotify:track:b".to_string()],
        }]
    );
}

#[tokio::test]
async fn add_track_rejects_duplicate_before_any_remote_call() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist(
        "p1",
        "Mix",
        vec![test_track("a"), test_track("b")],
    ));
    let before = library.get("p1").unwrap().tracks.clone();

    let result = library.add_track(&api, "token", "p1", test_track("a")).await;

    assert_eq!(result, Err(LibraryError::DuplicateTrack));
    assert_eq!(library.get("p1").unwrap().tracks, before);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn add_track_to_unknown_playlist_is_not_found() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();

    let result = library
        .add_track(&api, "token", "missing", test_track("a"))
        .await;

    assert!(matches!(result, Err(LibraryError::NotFound(_))));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn failed_remote_add_leaves_sequence_unchanged() {
    let api = MockCatalog::new();
    api.fail_with("add_tracks", ApiError::RateLimited(Some(4)));
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("p1", "Mix", vec![test_track("a")]));

    let result = library.add_track(&api, "token", "p1", test_track("b")).await;

    assert_eq!(
        result,
        Err(LibraryError::Api(ApiError::RateLimited(Some(4))))
    );
    assert_eq!(library.get("p1").unwrap().tracks.len(), 1);
}

#[tokio::test]
async fn remove_track_calls_remote_before_local_filter() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist(
        "p1",
        "Mix",
        vec![test_track("a"), test_track("b")],
    ));

    library
        .remove_track(&api, "token", "p1", "a")
        .await
        .unwrap();

    let tracks = &library.get("p1").unwrap().tracks;
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, "b");
    assert_eq!(
        api.calls(),
        vec![Call::RemoveTracks {
            playlist: "p1".to_string(),
            uris: vec!["spotify:track:a".to_string()],
        }]
    );
}

#[tokio::test]
async fn failed_remote_remove_keeps_track() {
    let api = MockCatalog::new();
    api.fail_with("remove_tracks", ApiError::Unreachable("timeout".to_string()));
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("p1", "Mix", vec![test_track("a")]));

    let result = library.remove_track(&api, "token", "p1", "a").await;

    assert!(matches!(
        result,
        Err(LibraryError::Api(ApiError::Unreachable(_)))
    ));
    assert_eq!(library.get("p1").unwrap().tracks.len(), 1);
}

#[tokio::test]
async fn reorder_first_track_up_is_out_of_range_without_remote_call() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist(
        "p1",
        "Mix",
        vec![test_track("a"), test_track("b")],
    ));

    let result = library
        .reorder_track(&api, "token", "p1", 0, MoveDirection::Up)
        .await;

    assert_eq!(result, Err(LibraryError::OutOfRange));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn reorder_last_track_down_is_out_of_range() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist(
        "p1",
        "Mix",
        vec![test_track("a"), test_track("b")],
    ));

    let result = library
        .reorder_track(&api, "token", "p1", 1, MoveDirection::Down)
        .await;

    assert_eq!(result, Err(LibraryError::OutOfRange));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn reorder_down_sends_insertion_point_two_past_and_resyncs() {
    let api = MockCatalog::new();
    let (a, b, c) = (test_track("a"), test_track("b"), test_track("c"));
    // The remote answers with its authoritative post-move order.
    api.serve_playlist(playlist_response(
        "p1",
        "Mix",
        &[b.clone(), a.clone(), c.clone()],
    ));
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist(
        "p1",
        "Mix",
        vec![a.clone(), b.clone(), c.clone()],
    ));

    library
        .reorder_track(&api, "token", "p1", 0, MoveDirection::Down)
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![
            Call::Reorder {
                playlist: "p1".to_string(),
                range_start: 0,
                insert_before: 2,
            },
            Call::GetPlaylist {
                playlist: "p1".to_string(),
            },
        ]
    );
    let order: Vec<&str> = library
        .get("p1")
        .unwrap()
        .tracks
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(order, vec!["b", "a", "c"]);
}

#[tokio::test]
async fn reorder_up_sends_insertion_point_one_before() {
    let api = MockCatalog::new();
    let (a, b) = (test_track("a"), test_track("b"));
    api.serve_playlist(playlist_response("p1", "Mix", &[b.clone(), a.clone()]));
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("p1", "Mix", vec![a.clone(), b.clone()]));

    library
        .reorder_track(&api, "token", "p1", 1, MoveDirection::Up)
        .await
        .unwrap();

    assert_eq!(
        api.calls()[0],
        Call::Reorder {
            playlist: "p1".to_string(),
            range_start: 1,
            insert_before: 0,
        }
    );
}

#[tokio::test]
async fn rename_commits_only_on_remote_success() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("p1", "Old", vec![]));

    library
        .rename_playlist(&api, "token", "p1", "New")
        .await
        .unwrap();
    assert_eq!(library.get("p1").unwrap().name, "New");

    api.fail_with("rename", ApiError::RateLimited(None));
    let result = library.rename_playlist(&api, "token", "p1", "Newer").await;
    assert!(result.is_err());
    assert_eq!(library.get("p1").unwrap().name, "New");
}

#[tokio::test]
async fn redescribe_failure_keeps_last_known_good_value() {
    let api = MockCatalog::new();
    api.fail_with("describe", ApiError::Unreachable("boom".to_string()));
    let mut library = PlaylistLibrary::new();
    let mut playlist = test_playlist("p1", "Mix", vec![]);
    playlist.description = "original".to_string();
    library.adopt(playlist);

    let result = library
        .redescribe_playlist(&api, "token", "p1", "garbled")
        .await;

    assert!(result.is_err());
    assert_eq!(library.get("p1").unwrap().description, "original");
}

#[tokio::test]
async fn toggle_select_requires_live_playlist() {
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("p1", "Mix", vec![]));

    assert_eq!(library.toggle_select("p1"), Ok(true));
    assert!(library.is_selected("p1"));
    assert_eq!(library.toggle_select("p1"), Ok(false));
    assert!(!library.is_selected("p1"));
    assert!(matches!(
        library.toggle_select("ghost"),
        Err(LibraryError::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_selected_reports_per_id_and_keeps_failing_playlist() {
    let api = MockCatalog::new();
    api.fail_with("delete:p2", ApiError::Unreachable("boom".to_string()));
    let mut library = PlaylistLibrary::new();
    for id in ["p1", "p2", "p3"] {
        library.adopt(test_playlist(id, id, vec![]));
        library.toggle_select(id).unwrap();
    }

    let outcome = library.delete_selected(&api, "token").await;

    assert_eq!(outcome.deleted, vec!["p1".to_string(), "p3".to_string()]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, "p2");

    // The failing playlist stays present and selected; the others are gone
    // from both the collection and the selection.
    assert_eq!(library.playlists().len(), 1);
    assert!(library.get("p2").is_some());
    assert!(library.is_selected("p2"));
    assert!(!library.is_selected("p1"));
    assert!(!library.is_selected("p3"));
}

#[tokio::test]
async fn delete_by_explicit_ids_spares_unrelated_selected_playlists() {
    let api = MockCatalog::new();
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("p2", "Keep", vec![]));
    library.adopt(test_playlist("p9", "Drop", vec![]));
    library.toggle_select("p2").unwrap();

    let outcome = library
        .delete_playlists(&api, "token", &["p9".to_string()])
        .await;

    assert_eq!(outcome.deleted, vec!["p9".to_string()]);
    assert_eq!(
        api.calls(),
        vec![Call::Delete {
            playlist: "p9".to_string(),
        }]
    );
    // The merely-selected playlist is untouched and still selected.
    assert!(library.get("p2").is_some());
    assert!(library.is_selected("p2"));
    assert!(library.get("p9").is_none());
}

#[tokio::test]
async fn delete_of_already_unfollowed_playlist_still_evicts_locally() {
    let api = MockCatalog::new();
    api.fail_with("delete:p1", ApiError::NotFound);
    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("p1", "Mix", vec![]));
    library.toggle_select("p1").unwrap();

    let outcome = library.delete_selected(&api, "token").await;

    assert_eq!(outcome.deleted, vec!["p1".to_string()]);
    assert!(outcome.failed.is_empty());
    assert!(library.playlists().is_empty());
}

#[tokio::test]
async fn sync_rebuilds_collection_and_drops_stale_selection() {
    let api = MockCatalog::new();
    api.serve_summaries(vec![
        spplcli::types::PlaylistSummary {
            id: "p1".to_string(),
            name: "One".to_string(),
            description: None,
        },
        spplcli::types::PlaylistSummary {
            id: "p2".to_string(),
            name: "Two".to_string(),
            description: None,
        },
    ]);
    api.serve_playlist(playlist_response("p1", "One", &[test_track("a")]));
    api.serve_playlist(playlist_response("p2", "Two", &[]));

    let mut library = PlaylistLibrary::new();
    library.adopt(test_playlist("stale", "Old", vec![]));
    library.toggle_select("stale").unwrap();

    let count = library.sync(&api, "token").await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(library.playlists().len(), 2);
    assert!(library.get("stale").is_none());
    assert!(!library.is_selected("stale"));
    assert_eq!(library.get("p1").unwrap().tracks.len(), 1);
}
