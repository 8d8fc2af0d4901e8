mod common;

use common::{Call, FakeSpotify, episode, local_file, track, tracks};
use plcurate::{
    error::FetchError,
    management::{PLAYLIST_ITEMS, SnapshotStore},
    pipeline::{PAGE_SIZE, collect_items, collect_pages, fetch_all},
    types::Track,
};
use tempfile::TempDir;

fn offsets(api: &FakeSpotify) -> Vec<usize> {
    api.page_calls()
        .into_iter()
        .map(|c| match c {
            Call::Page { offset, .. } => offset,
            other => panic!("unexpected call {:?}", other),
        })
        .collect()
}

#[tokio::test]
async fn test_empty_playlist_issues_single_request() {
    let api = FakeSpotify::new().with_playlist("src", Vec::new());

    let result = collect_pages(&api, "src").await.unwrap();

    assert!(result.is_empty());
    assert_eq!(offsets(&api), vec![0]);
}

#[tokio::test]
async fn test_full_page_requires_trailing_empty_page() {
    let api = FakeSpotify::new().with_playlist("src", tracks(100));

    let result = collect_pages(&api, "src").await.unwrap();

    assert_eq!(result.len(), 100);
    assert_eq!(offsets(&api), vec![0, 100]);
}

#[tokio::test]
async fn test_partial_last_page_is_followed_by_empty_page() {
    let api = FakeSpotify::new().with_playlist("src", tracks(250));

    let result = collect_pages(&api, "src").await.unwrap();

    assert_eq!(result.len(), 250);
    assert_eq!(offsets(&api), vec![0, 100, 200, 300]);

    // order is preserved across pages
    let ids: Vec<&str> = result.iter().map(|t| t.id()).collect();
    assert_eq!(ids.first(), Some(&"t0"));
    assert_eq!(ids[100], "t100");
    assert_eq!(ids.last(), Some(&"t249"));
}

#[tokio::test]
async fn test_every_page_uses_fixed_size() {
    let api = FakeSpotify::new().with_playlist("src", tracks(150));

    collect_pages(&api, "src").await.unwrap();

    assert_eq!(offsets(&api), vec![0, 100, 200]);
    for call in api.page_calls() {
        match call {
            Call::Page {
                playlist, limit, ..
            } => {
                assert_eq!(playlist, "src");
                assert_eq!(limit, PAGE_SIZE);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_unavailable_items_are_skipped() {
    let items = vec![
        Some(track("a", "A", &[])),
        None,
        Some(track("b", "B", &[])),
    ];
    let api = FakeSpotify::new().with_items("src", items);

    let result = collect_pages(&api, "src").await.unwrap();

    let ids: Vec<&str> = result.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(offsets(&api), vec![0, 100]);
}

#[tokio::test]
async fn test_local_files_and_episodes_are_skipped() {
    let entries = vec![
        Some(track("a", "A", &["x"]).into()),
        Some(local_file("home-recording")),
        Some(episode("e1")),
        Some(track("b", "B", &[]).into()),
    ];
    let api = FakeSpotify::new().with_entries("src", entries);

    let result = collect_pages(&api, "src").await.unwrap();

    let ids: Vec<&str> = result.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(result[0].artists[0].name, "Artist x");

    // the raw listing still holds all four entries
    let entries = collect_items(&api, "src").await.unwrap();
    assert_eq!(entries.len(), 4);
    assert!(entries[1].is_local);
    assert!(entries[2].is_episode());
}

#[tokio::test]
async fn test_failing_later_page_fails_whole_fetch() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let api = FakeSpotify::new()
        .with_playlist("src", tracks(150))
        .failing_page("src", 100);

    let result = fetch_all(&api, "src", &store).await;

    assert!(matches!(result, Err(FetchError::Status { .. })));
    assert!(!store.path(PLAYLIST_ITEMS).exists());
    assert_eq!(offsets(&api), vec![0, 100]);
}

#[tokio::test]
async fn test_fetch_all_persists_raw_tracks() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let api = FakeSpotify::new().with_playlist("src", tracks(3));

    let result = fetch_all(&api, "src", &store).await.unwrap();

    let persisted: Vec<Track> = store.load(PLAYLIST_ITEMS).await.unwrap();
    assert_eq!(persisted, result);
    assert_eq!(persisted.len(), 3);
}
