use std::collections::BTreeSet;

use crate::types::EnrichedTrack;

/// Every genre that appears on at least one track, sorted.
pub fn aggregate_genres(tracks: &[EnrichedTrack]) -> BTreeSet<String> {
    tracks
        .iter()
        .flat_map(|t| t.genres.iter().cloned())
        .collect()
}
