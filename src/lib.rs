//! plcurate library
//!
//! Enriches the tracks of a Spotify playlist with artist genres and audio
//! features, exports the result as a spreadsheet and JSON documents, and
//! redistributes the tracks into three playlists by energy.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local login server
//! - `cli` - Command implementations
//! - `config` - Environment-backed configuration
//! - `error` - Error types per pipeline stage
//! - `management` - JSON snapshot storage
//! - `pipeline` - Fetch, enrich, export, genre and repartition stages
//! - `server` - Local HTTP server for the OAuth callback
//! - `spotify` - Spotify Web API client and token provider
//! - `types` - Data structures
//! - `utils` - Helpers shared by the stages
//!
//! # Example
//!
//! ```
//! use plcurate::{config::Config, management::SnapshotStore, pipeline, spotify};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let token = spotify::auth::authenticate(&config, spotify::auth::AuthMode::Service).await?;
//!     let api = spotify::SpotifyClient::new(config.api_url.clone(), token);
//!     let store = SnapshotStore::new(config.output_dir.clone());
//!     let tracks = pipeline::fetch_all(&api, config.source_playlist()?, &store).await?;
//!     println!("{} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// ```
/// success!("Exported {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits with
/// status 1.
///
/// Only command code uses this; library stages return errors instead.
///
/// ```
/// error!("Repartition failed: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// ```
/// warning!("Skipping track {}: {}", name, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
