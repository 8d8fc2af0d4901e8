//! # Spotify Integration Module
//!
//! The remote side of the pipeline. Every call the pipeline makes goes
//! through the [`SpotifyApi`] trait so the stages can be driven by a test
//! double; [`SpotifyClient`] is the reqwest implementation talking to the
//! real Web API.
//!
//! ## Endpoints
//!
//! - `GET /playlists/{id}/tracks` - paged playlist listing ([`playlists`])
//! - `DELETE /playlists/{id}/tracks` - remove a single track ([`playlists`])
//! - `POST /playlists/{id}/tracks` - add a single track ([`playlists`])
//! - `GET {artist href}` - artist genres ([`artists`])
//! - `GET /audio-features/{id}` - track audio features ([`features`])
//! - `POST /api/token` - client-credentials and authorization-code grants ([`auth`])
//!
//! Calls are issued one at a time without retry or timeout. Any non-success
//! status is turned into an error carrying the status and response body.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    error::{FetchError, MutationError},
    types::{AudioFeatures, BearerToken, PlaylistItem},
};

pub mod artists;
pub mod auth;
pub mod features;
pub mod playlists;

/// Remote operations the pipeline depends on.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// One page of a playlist's items starting at `offset`.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, FetchError>;

    /// Genres of the artist behind `artist_href`.
    async fn artist_genres(&self, artist_href: &str) -> Result<Vec<String>, FetchError>;

    async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, FetchError>;

    /// Removes every occurrence of `track_uri` from the playlist.
    async fn remove_track(&self, playlist_id: &str, track_uri: &str) -> Result<(), MutationError>;

    async fn add_track(&self, playlist_id: &str, track_uri: &str) -> Result<(), MutationError>;
}

/// Web API client bound to one bearer token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
    token: BearerToken,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, token: BearerToken) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Turns a non-success mutation response into a [`MutationError`].
async fn check_mutation(
    method: &'static str,
    url: &str,
    response: Response,
) -> Result<(), MutationError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(MutationError::Status {
        method,
        url: url.to_string(),
        status,
        body,
    })
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, FetchError> {
        self.get_playlist_items(playlist_id, offset, limit).await
    }

    async fn artist_genres(&self, artist_href: &str) -> Result<Vec<String>, FetchError> {
        self.get_artist_genres(artist_href).await
    }

    async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, FetchError> {
        self.get_audio_features(track_id).await
    }

    async fn remove_track(&self, playlist_id: &str, track_uri: &str) -> Result<(), MutationError> {
        self.delete_playlist_track(playlist_id, track_uri).await
    }

    async fn add_track(&self, playlist_id: &str, track_uri: &str) -> Result<(), MutationError> {
        self.post_playlist_track(playlist_id, track_uri).await
    }
}
