use std::path::PathBuf;

use crate::{
    config::Config,
    error,
    error::PipelineError,
    info,
    management::{ENRICHED_ITEMS, read_json},
    pipeline::{self, RepartitionReport},
    spotify::SpotifyClient,
    success,
    types::{BearerToken, EnrichedTrack, Tier},
};

use super::{
    CollectArgs,
    collect::{print_collected, run_collect},
};

/// Redistributes the tracks of an enrichment snapshot.
pub async fn repartition(config: &Config, snapshot: Option<PathBuf>) {
    let path = snapshot.unwrap_or_else(|| config.output_dir.join(ENRICHED_ITEMS));

    let tracks: Vec<EnrichedTrack> = match read_json(&path).await {
        Ok(tracks) => tracks,
        Err(e) => error!(
            "Cannot load enriched tracks. Run plcurate collect first.\n Error: {}",
            e
        ),
    };

    info!("Loaded {} tracks from {}", tracks.len(), path.display());
    match run_repartition(config, &tracks).await {
        Ok(report) => print_report(&report),
        Err(e) => error!("Repartition failed: {}", e),
    }
}

/// Collects the source playlist and redistributes it in one go.
pub async fn run(config: &Config, args: CollectArgs) {
    // fail before any remote call if the write side is not configured
    if let Err(e) = config.destinations().and(config.user_token().map(|_| ())) {
        error!("Cannot repartition: {}", e);
    }

    let collected = match run_collect(config, &args).await {
        Ok(collected) => collected,
        Err(e) => error!("Collect failed: {}", e),
    };
    print_collected(&collected);

    match run_repartition(config, &collected.tracks).await {
        Ok(report) => print_report(&report),
        Err(e) => error!("Repartition failed: {}", e),
    }
}

pub(crate) async fn run_repartition(
    config: &Config,
    tracks: &[EnrichedTrack],
) -> Result<RepartitionReport, PipelineError> {
    let destinations = config.destinations()?;
    let token = BearerToken::from_raw(config.user_token()?);
    let api = SpotifyClient::new(config.api_url.clone(), token);

    Ok(pipeline::repartition(&api, tracks, &destinations).await?)
}

fn print_report(report: &RepartitionReport) {
    for tier in Tier::ALL {
        success!(
            "{}: removed {}, added {}",
            tier,
            report.removed.get(tier),
            report.added.get(tier)
        );
    }
}
