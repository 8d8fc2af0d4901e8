//! # Curation Pipeline
//!
//! The stages that turn a source playlist into three energy-tiered
//! playlists:
//!
//! ```text
//! fetch ──► enrich ──┬──► export
//!                    ├──► genres
//!                    └──► repartition
//! ```
//!
//! - [`fetch`] - paginated read of the source playlist
//! - [`enrich`] - per-artist genre and per-track audio-feature lookups
//! - [`export`] - fixed 17-column spreadsheet plus JSON document
//! - [`genres`] - deduplicated genre set
//! - [`repartition`] - clear-then-assign of the destination playlists
//!
//! Stages hand their results to the next one in-process. Each stage also
//! writes a JSON snapshot through [`SnapshotStore`], which
//! `plcurate repartition` and `plcurate tiers` can resume from.
//!
//! All remote calls are issued sequentially and any failure aborts the
//! current stage.

use std::{collections::BTreeSet, path::PathBuf};

use crate::{
    error::PipelineError,
    management::{GENRES, SnapshotStore},
    spotify::SpotifyApi,
    types::EnrichedTrack,
};

pub mod enrich;
pub mod export;
pub mod fetch;
pub mod genres;
pub mod repartition;

pub use enrich::{FailurePolicy, enrich, enrich_track};
pub use export::{COLUMNS, ExportSummary, TrackRow, export, flatten};
pub use fetch::{PAGE_SIZE, collect_items, collect_pages, fetch_all};
pub use genres::aggregate_genres;
pub use repartition::{RepartitionReport, TierCounts, clear_playlist, repartition, tier_counts};

#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub playlist_id: String,
    pub policy: FailurePolicy,
    pub spreadsheet: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Collected {
    pub tracks: Vec<EnrichedTrack>,
    pub genres: BTreeSet<String>,
    pub export: ExportSummary,
}

/// Fetches, enriches and exports the source playlist, then writes the
/// aggregated genres.
pub async fn collect(
    api: &dyn SpotifyApi,
    store: &SnapshotStore,
    options: &CollectOptions,
) -> Result<Collected, PipelineError> {
    let tracks = fetch_all(api, &options.playlist_id, store).await?;
    let tracks = enrich(api, tracks, options.policy, store).await?;
    let export = export(&tracks, store, &options.spreadsheet).await?;

    let genres = aggregate_genres(&tracks);
    store.persist(GENRES, &genres).await?;

    Ok(Collected {
        tracks,
        genres,
        export,
    })
}
