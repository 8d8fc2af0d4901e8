//! # CLI Module
//!
//! User-facing commands. Each command resolves its inputs from the
//! [`Config`](crate::config::Config) and its flags, runs the matching
//! pipeline stages and reports the outcome with the `info!`, `success!`,
//! `warning!` and `error!` macros. Any error ends the process with status 1.
//!
//! ## Commands
//!
//! - [`login`] - interactive authorization-code flow, prints a user token
//! - [`collect`] - fetch, enrich, export and aggregate genres
//! - [`repartition`] - redistribute the enrichment snapshot into the tier playlists
//! - [`run`] - `collect` followed by an in-process `repartition`
//! - [`tiers`] - print the tier each snapshot track would be assigned to
//!
//! ## Typical session
//!
//! ```bash
//! plcurate login                 # once, copy the token into SPOTIFY_USER_TOKEN
//! plcurate collect               # writes output/*.json and output/playlist_tracks.xlsx
//! plcurate tiers                 # check the split
//! plcurate repartition           # rewrite the three destination playlists
//! ```

mod collect;
mod login;
mod repartition;
mod tiers;

use std::path::PathBuf;

pub use collect::collect;
pub use login::login;
pub use repartition::repartition;
pub use repartition::run;
pub use tiers::tiers;

/// Flags shared by `collect` and `run`.
#[derive(Debug, Clone, Default)]
pub struct CollectArgs {
    /// Source playlist, falls back to `SOURCE_PLAYLIST_ID`.
    pub playlist: Option<String>,
    /// Drop tracks whose lookups fail instead of aborting.
    pub skip_failed: bool,
    /// Spreadsheet target, defaults to `<OUTPUT_DIR>/playlist_tracks.xlsx`.
    pub spreadsheet: Option<PathBuf>,
}
