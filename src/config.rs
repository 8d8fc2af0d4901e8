//! Configuration management for plcurate.
//!
//! Values come from the process environment, optionally seeded from `.env`
//! files. They are read exactly once into an immutable [`Config`] which is
//! then handed to each pipeline component; nothing below the command layer
//! looks at the environment.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`plcurate/.env`)
//! 4. Built-in defaults for endpoints and output location

use std::{
    env, fmt,
    path::{Path, PathBuf},
};

use crate::{error::ConfigError, types::Destinations};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5000/callback";
pub const DEFAULT_SCOPE: &str = "playlist-modify-private playlist-modify-public";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Loads `.env` files into the process environment.
///
/// Variables that are already set are never overwritten, so the real
/// environment wins over the working directory file, which wins over the
/// file in the local data directory. Missing files are not an error.
///
/// # Errors
///
/// Returns an error if the local data directory cannot be created or a
/// present `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    if Path::new(".env").is_file() {
        dotenv::dotenv().map_err(|e| e.to_string())?;
    }

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plcurate/.env");
    path
}

/// Client id and secret registered with the Spotify developer dashboard.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Immutable runtime configuration.
#[derive(Clone)]
pub struct Config {
    pub credentials: Option<Credentials>,
    pub api_url: String,
    pub token_url: String,
    pub auth_url: String,
    pub redirect_uri: String,
    pub scope: String,
    pub server_address: String,
    pub source_playlist: Option<String>,
    pub heavy_playlist: Option<String>,
    pub medium_playlist: Option<String>,
    pub light_playlist: Option<String>,
    pub user_token: Option<String>,
    pub output_dir: PathBuf,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let credentials = match (get("SPOTIFY_CLIENT_ID"), get("SPOTIFY_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Self {
            credentials,
            api_url: or("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            token_url: or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            auth_url: or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            redirect_uri: or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            server_address: or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            source_playlist: get("SOURCE_PLAYLIST_ID"),
            heavy_playlist: get("HEAVY_PLAYLIST_ID"),
            medium_playlist: get("MEDIUM_PLAYLIST_ID"),
            light_playlist: get("LIGHT_PLAYLIST_ID"),
            user_token: get("SPOTIFY_USER_TOKEN"),
            output_dir: PathBuf::from(or("OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
        }
    }

    pub fn source_playlist(&self) -> Result<&str, ConfigError> {
        self.source_playlist
            .as_deref()
            .ok_or(ConfigError::Missing("SOURCE_PLAYLIST_ID"))
    }

    /// The three destination playlists, all of which must be configured.
    pub fn destinations(&self) -> Result<Destinations, ConfigError> {
        let require = |value: &Option<String>, key: &'static str| {
            value.clone().ok_or(ConfigError::Missing(key))
        };

        Ok(Destinations {
            heavy: require(&self.heavy_playlist, "HEAVY_PLAYLIST_ID")?,
            medium: require(&self.medium_playlist, "MEDIUM_PLAYLIST_ID")?,
            light: require(&self.light_playlist, "LIGHT_PLAYLIST_ID")?,
        })
    }

    pub fn user_token(&self) -> Result<&str, ConfigError> {
        self.user_token
            .as_deref()
            .ok_or(ConfigError::Missing("SPOTIFY_USER_TOKEN"))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("credentials", &self.credentials)
            .field("api_url", &self.api_url)
            .field("token_url", &self.token_url)
            .field("auth_url", &self.auth_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("server_address", &self.server_address)
            .field("source_playlist", &self.source_playlist)
            .field("heavy_playlist", &self.heavy_playlist)
            .field("medium_playlist", &self.medium_playlist)
            .field("light_playlist", &self.light_playlist)
            .field(
                "user_token",
                &self.user_token.as_ref().map(|_| "<redacted>"),
            )
            .field("output_dir", &self.output_dir)
            .finish()
    }
}
