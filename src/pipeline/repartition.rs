use crate::{
    error::MutationError,
    spotify::SpotifyApi,
    types::{Destinations, EnrichedTrack, Tier},
    utils, warning,
};

use super::fetch::collect_items;

/// Per-tier counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub heavy: usize,
    pub medium: usize,
    pub light: usize,
}

impl TierCounts {
    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Heavy => self.heavy,
            Tier::Medium => self.medium,
            Tier::Light => self.light,
        }
    }

    fn get_mut(&mut self, tier: Tier) -> &mut usize {
        match tier {
            Tier::Heavy => &mut self.heavy,
            Tier::Medium => &mut self.medium,
            Tier::Light => &mut self.light,
        }
    }

    pub fn total(&self) -> usize {
        self.heavy + self.medium + self.light
    }
}

/// Counts of what a repartition run removed and added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepartitionReport {
    pub removed: TierCounts,
    pub added: TierCounts,
}

/// Counts tracks per tier without touching any playlist.
pub fn tier_counts(tracks: &[EnrichedTrack]) -> TierCounts {
    let mut counts = TierCounts::default();
    for track in tracks {
        *counts.get_mut(track.tier()) += 1;
    }
    counts
}

/// Removes every item currently in the playlist, one request per item.
/// Local files and episodes are removed by the URI the listing returned.
/// Returns the number of removed items.
pub async fn clear_playlist(api: &dyn SpotifyApi, playlist_id: &str) -> Result<usize, MutationError> {
    let current = collect_items(api, playlist_id)
        .await
        .map_err(|source| MutationError::Clear {
            playlist: playlist_id.to_string(),
            source,
        })?;

    let mut removed = 0;
    for entry in &current {
        let Some(uri) = entry.uri() else {
            warning!(
                "Cannot remove \"{}\" from playlist {}: no uri",
                entry.label(),
                playlist_id
            );
            continue;
        };
        api.remove_track(playlist_id, &uri).await?;
        removed += 1;
    }

    Ok(removed)
}

/// Replaces the contents of the three destination playlists.
///
/// Phase one clears heavy, medium and light in that order. Phase two adds
/// every track to the playlist of its energy tier, one request per track.
/// Nothing is rolled back: if phase two fails, the playlists stay cleared
/// or partially filled.
pub async fn repartition(
    api: &dyn SpotifyApi,
    tracks: &[EnrichedTrack],
    destinations: &Destinations,
) -> Result<RepartitionReport, MutationError> {
    let mut report = RepartitionReport::default();

    let pb = utils::spinner("Clearing destination playlists...");
    let cleared = clear_all(api, destinations, &mut report).await;
    pb.finish_and_clear();
    cleared?;

    let pb = utils::progress_bar(tracks.len(), "Assigning tracks");
    let assigned = assign_all(api, tracks, destinations, &mut report, &pb).await;
    pb.finish_and_clear();
    assigned?;

    Ok(report)
}

async fn clear_all(
    api: &dyn SpotifyApi,
    destinations: &Destinations,
    report: &mut RepartitionReport,
) -> Result<(), MutationError> {
    for tier in Tier::ALL {
        *report.removed.get_mut(tier) = clear_playlist(api, destinations.playlist(tier)).await?;
    }
    Ok(())
}

async fn assign_all(
    api: &dyn SpotifyApi,
    tracks: &[EnrichedTrack],
    destinations: &Destinations,
    report: &mut RepartitionReport,
    pb: &indicatif::ProgressBar,
) -> Result<(), MutationError> {
    for track in tracks {
        let tier = track.tier();
        api.add_track(destinations.playlist(tier), &track.track.uri())
            .await?;
        *report.added.get_mut(tier) += 1;
        pb.inc(1);
    }
    Ok(())
}
