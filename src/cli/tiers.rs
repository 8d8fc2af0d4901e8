use std::path::PathBuf;

use tabled::Table;

use crate::{
    config::Config,
    error,
    management::{ENRICHED_ITEMS, read_json},
    pipeline, success,
    types::{EnrichedTrack, Tier},
    utils,
};

/// Prints the tier of every snapshot track. Makes no remote calls.
pub async fn tiers(config: &Config, snapshot: Option<PathBuf>) {
    let path = snapshot.unwrap_or_else(|| config.output_dir.join(ENRICHED_ITEMS));

    let mut tracks: Vec<EnrichedTrack> = match read_json(&path).await {
        Ok(tracks) => tracks,
        Err(e) => error!(
            "Cannot load enriched tracks. Run plcurate collect first.\n Error: {}",
            e
        ),
    };

    // highest energy first
    tracks.sort_by(|a, b| b.audio_features.energy.total_cmp(&a.audio_features.energy));

    let table = Table::new(utils::tier_table_rows(&tracks));
    println!("{}\n", table);

    let counts = pipeline::tier_counts(&tracks);
    for tier in Tier::ALL {
        success!("{}: {} tracks", tier, counts.get(tier));
    }
}
