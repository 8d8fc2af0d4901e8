use crate::{
    config::Config,
    error,
    error::PipelineError,
    info,
    management::{SPREADSHEET, SnapshotStore},
    pipeline::{self, CollectOptions, Collected, FailurePolicy},
    spotify::{
        SpotifyClient,
        auth::{AuthMode, authenticate},
    },
    success,
};

use super::CollectArgs;

pub async fn collect(config: &Config, args: CollectArgs) {
    match run_collect(config, &args).await {
        Ok(collected) => print_collected(&collected),
        Err(e) => error!("Collect failed: {}", e),
    }
}

pub(crate) async fn run_collect(
    config: &Config,
    args: &CollectArgs,
) -> Result<Collected, PipelineError> {
    let playlist_id = match &args.playlist {
        Some(id) => id.clone(),
        None => config.source_playlist()?.to_string(),
    };

    let token = authenticate(config, AuthMode::Service).await?;
    let api = SpotifyClient::new(config.api_url.clone(), token);
    let store = SnapshotStore::new(config.output_dir.clone());

    let options = CollectOptions {
        playlist_id,
        policy: if args.skip_failed {
            FailurePolicy::SkipTrack
        } else {
            FailurePolicy::FailFast
        },
        spreadsheet: args
            .spreadsheet
            .clone()
            .unwrap_or_else(|| store.path(SPREADSHEET)),
    };

    info!("Collecting playlist {}", options.playlist_id);
    pipeline::collect(&api, &store, &options).await
}

pub(crate) fn print_collected(collected: &Collected) {
    success!(
        "Enriched {} tracks ({} distinct genres)",
        collected.tracks.len(),
        collected.genres.len()
    );
    success!(
        "Exported {} rows to {} and {}",
        collected.export.rows,
        collected.export.spreadsheet.display(),
        collected.export.document.display()
    );
}
