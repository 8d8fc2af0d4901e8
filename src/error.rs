//! Error types for every stage of the curation pipeline.
//!
//! Each stage has its own error enum so a failure names the stage that
//! produced it. [`PipelineError`] wraps all of them for command code.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("client credentials are not configured (set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET)")]
    MissingCredentials,
    #[error("token request rejected with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token response is missing {0}")]
    MalformedResponse(&'static str),
    #[error("cannot build authorize url: {0}")]
    InvalidUrl(String),
    #[error("cannot start callback server: {0}")]
    CallbackServer(String),
    #[error("no authorization callback received within {0} seconds")]
    TimedOut(u64),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("cannot access snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot (de)serialize snapshot {path}: {source}")]
    Serde {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("GET {url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

#[derive(Error, Debug)]
pub enum MutationError {
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("cannot read contents of playlist {playlist} before clearing it: {source}")]
    Clear {
        playlist: String,
        #[source]
        source: FetchError,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot write spreadsheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot write csv spreadsheet: {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot write xlsx spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("repartition failed: {0}")]
    Mutation(#[from] MutationError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
