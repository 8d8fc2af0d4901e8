use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plcurate::{cli, config, config::Config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify and print a user token for playlist writes
    Login,

    /// Fetch, enrich and export the source playlist
    Collect(CollectOptions),

    /// Redistribute enriched tracks into the heavy, medium and light playlists
    Repartition(SnapshotOptions),

    /// Collect and repartition in a single run
    Run(CollectOptions),

    /// Show the energy tier of every enriched track without changing playlists
    Tiers(SnapshotOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CollectOptions {
    /// Source playlist id (defaults to SOURCE_PLAYLIST_ID)
    #[clap(long)]
    pub playlist: Option<String>,

    /// Skip tracks whose genre or audio-feature lookup fails instead of aborting
    #[clap(long)]
    pub skip_failed: bool,

    /// Spreadsheet path; a .csv extension writes CSV, anything else xlsx
    #[clap(long)]
    pub spreadsheet: Option<PathBuf>,
}

impl From<CollectOptions> for cli::CollectArgs {
    fn from(opt: CollectOptions) -> Self {
        cli::CollectArgs {
            playlist: opt.playlist,
            skip_failed: opt.skip_failed,
            spreadsheet: opt.spreadsheet,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct SnapshotOptions {
    /// Enrichment snapshot to read (defaults to OUTPUT_DIR/playlist_items_with_extra_info.json)
    #[clap(long)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Login => cli::login(Arc::new(config)).await,
        Command::Collect(opt) => cli::collect(&config, opt.into()).await,
        Command::Repartition(opt) => cli::repartition(&config, opt.snapshot).await,
        Command::Run(opt) => cli::run(&config, opt.into()).await,
        Command::Tiers(opt) => cli::tiers(&config, opt.snapshot).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
