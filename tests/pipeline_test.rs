mod common;

use common::{FakeSpotify, track};
use plcurate::{
    management::{ENRICHED_ITEMS, EXPORTED_TRACKS, GENRES, PLAYLIST_ITEMS, SnapshotStore},
    pipeline::{CollectOptions, FailurePolicy, collect, repartition},
    types::{Destinations, EnrichedTrack, Track},
};
use tempfile::TempDir;

#[tokio::test]
async fn test_collect_then_repartition() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().join("output"));
    let api = FakeSpotify::new()
        .with_playlist(
            "src",
            vec![
                track("ta", "Song A", &["x"]),
                track("tb", "Song B", &["y", "z"]),
            ],
        )
        .with_playlist("heavy", vec![track("old", "Old", &[])])
        .with_playlist("medium", Vec::new())
        .with_playlist("light", Vec::new())
        .with_artist("x", &["pop"])
        .with_artist("y", &["rock"])
        .with_artist("z", &["pop", "jazz"])
        .with_features("ta", 0.8)
        .with_features("tb", 0.2);

    let options = CollectOptions {
        playlist_id: "src".to_string(),
        policy: FailurePolicy::FailFast,
        spreadsheet: dir.path().join("output").join("tracks.csv"),
    };
    let collected = collect(&api, &store, &options).await.unwrap();

    assert_eq!(collected.tracks.len(), 2);
    assert_eq!(collected.tracks[1].genres, vec!["rock", "pop", "jazz"]);
    assert_eq!(
        collected.genres.iter().collect::<Vec<_>>(),
        vec!["jazz", "pop", "rock"]
    );
    assert_eq!(collected.export.rows, 2);

    let raw: Vec<Track> = store.load(PLAYLIST_ITEMS).await.unwrap();
    assert_eq!(raw.len(), 2);
    let snapshot: Vec<EnrichedTrack> = store.load(ENRICHED_ITEMS).await.unwrap();
    assert_eq!(snapshot, collected.tracks);
    let document: Vec<EnrichedTrack> = store.load(EXPORTED_TRACKS).await.unwrap();
    assert_eq!(document, collected.tracks);
    let genres: Vec<String> = store.load(GENRES).await.unwrap();
    assert_eq!(genres, vec!["jazz", "pop", "rock"]);

    let mut reader = csv::Reader::from_path(&options.spreadsheet).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][2], "pop");
    assert_eq!(&rows[1][2], "rock, pop, jazz");

    let destinations = Destinations {
        heavy: "heavy".to_string(),
        medium: "medium".to_string(),
        light: "light".to_string(),
    };
    let report = repartition(&api, &snapshot, &destinations).await.unwrap();

    assert_eq!(api.contents("heavy"), vec!["ta"]);
    assert!(api.contents("medium").is_empty());
    assert_eq!(api.contents("light"), vec!["tb"]);
    assert_eq!(report.removed.heavy, 1);
    assert_eq!(report.added.total(), 2);
}

#[tokio::test]
async fn test_collect_stops_at_first_failing_stage() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let api = FakeSpotify::new()
        .with_playlist("src", vec![track("ta", "Song A", &["x"])])
        .with_artist("x", &["pop"]);

    let options = CollectOptions {
        playlist_id: "src".to_string(),
        policy: FailurePolicy::FailFast,
        spreadsheet: dir.path().join("tracks.csv"),
    };
    let result = collect(&api, &store, &options).await;

    assert!(result.is_err());
    assert!(store.path(PLAYLIST_ITEMS).exists());
    assert!(!store.path(ENRICHED_ITEMS).exists());
    assert!(!store.path(GENRES).exists());
    assert!(!options.spreadsheet.exists());
}
