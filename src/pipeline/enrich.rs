use crate::{
    error::FetchError,
    management::{ENRICHED_ITEMS, SnapshotStore},
    spotify::SpotifyApi,
    types::{EnrichedTrack, Track},
    utils, warning,
};

/// What to do when a genre or audio-feature lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole batch on the first failed lookup.
    #[default]
    FailFast,
    /// Drop the failing track and continue with the next one.
    SkipTrack,
}

/// Attaches genres and audio features to a single track.
///
/// Artists are looked up in listed order, one request per artist; their
/// genres are merged in first-seen order without duplicates. The audio
/// features are requested last, by track id.
pub async fn enrich_track(api: &dyn SpotifyApi, track: Track) -> Result<EnrichedTrack, FetchError> {
    let mut genres: Vec<String> = Vec::new();
    for artist in &track.artists {
        let artist_genres = api.artist_genres(&artist.href).await?;
        utils::merge_genres(&mut genres, artist_genres);
    }

    let audio_features = api.audio_features(track.id()).await?;

    Ok(EnrichedTrack {
        track,
        genres,
        audio_features,
    })
}

/// Enriches every track in input order and checkpoints the result.
///
/// Artist genres are not cached: an artist appearing on several tracks is
/// requested once per appearance. The `playlist_items_with_extra_info.json`
/// snapshot is written once after the loop; an aborted batch loses all of
/// its enrichment work.
pub async fn enrich(
    api: &dyn SpotifyApi,
    tracks: Vec<Track>,
    policy: FailurePolicy,
    store: &SnapshotStore,
) -> Result<Vec<EnrichedTrack>, FetchError> {
    let pb = utils::progress_bar(tracks.len(), "Enriching tracks");
    let mut enriched: Vec<EnrichedTrack> = Vec::with_capacity(tracks.len());

    for track in tracks {
        let name = track.name.clone();
        match enrich_track(api, track).await {
            Ok(t) => enriched.push(t),
            Err(e) => match policy {
                FailurePolicy::FailFast => {
                    pb.finish_and_clear();
                    return Err(e);
                }
                FailurePolicy::SkipTrack => {
                    pb.suspend(|| warning!("Skipping track \"{}\": {}", name, e));
                }
            },
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    store.persist(ENRICHED_ITEMS, &enriched).await?;
    Ok(enriched)
}
