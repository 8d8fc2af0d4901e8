#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use plcurate::{
    error::{FetchError, MutationError},
    spotify::SpotifyApi,
    types::{
        ArtistRef, AudioFeatures, EnrichedTrack, ExternalUrls, ListedArtist, ListedTrack,
        PlaylistItem, Track, resource_id,
    },
};
use reqwest::StatusCode;

pub const API: &str = "https://api.spotify.com/v1";

/// A remote call as seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Page {
        playlist: String,
        offset: usize,
        limit: usize,
    },
    Genres(String),
    Features(String),
    Remove {
        playlist: String,
        uri: String,
    },
    Add {
        playlist: String,
        uri: String,
    },
}

/// In-memory stand-in for the Web API that records every call.
#[derive(Default)]
pub struct FakeSpotify {
    playlists: Mutex<HashMap<String, Vec<PlaylistItem>>>,
    genres: HashMap<String, Vec<String>>,
    features: HashMap<String, AudioFeatures>,
    failing_pages: HashSet<(String, usize)>,
    failing_adds: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(self, id: &str, tracks: Vec<Track>) -> Self {
        self.with_items(id, tracks.into_iter().map(Some).collect())
    }

    pub fn with_items(self, id: &str, items: Vec<Option<Track>>) -> Self {
        self.with_entries(
            id,
            items
                .into_iter()
                .map(|track| track.map(ListedTrack::from))
                .collect(),
        )
    }

    /// Raw listing entries, for local files and episodes.
    pub fn with_entries(self, id: &str, entries: Vec<Option<ListedTrack>>) -> Self {
        self.playlists.lock().unwrap().insert(
            id.to_string(),
            entries
                .into_iter()
                .map(|track| PlaylistItem { track })
                .collect(),
        );
        self
    }

    pub fn with_artist(mut self, artist_id: &str, genres: &[&str]) -> Self {
        self.genres.insert(
            artist_href(artist_id),
            genres.iter().map(|g| g.to_string()).collect(),
        );
        self
    }

    pub fn with_features(mut self, track_id: &str, energy: f64) -> Self {
        self.features.insert(track_id.to_string(), features(energy));
        self
    }

    pub fn failing_page(mut self, playlist: &str, offset: usize) -> Self {
        self.failing_pages.insert((playlist.to_string(), offset));
        self
    }

    pub fn failing_add(mut self, uri: &str) -> Self {
        self.failing_adds.insert(uri.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn page_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Page { .. }))
            .collect()
    }

    /// Track ids currently in a playlist. Entries without an href show up
    /// by their uri.
    pub fn contents(&self, playlist: &str) -> Vec<String> {
        self.playlists
            .lock()
            .unwrap()
            .get(playlist)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.track.as_ref())
                    .filter_map(|t| match &t.href {
                        Some(href) => Some(resource_id(href).to_string()),
                        None => t.uri.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn not_found(url: String) -> FetchError {
    FetchError::Status {
        url,
        status: StatusCode::NOT_FOUND,
        body: "{\"error\":{\"status\":404}}".to_string(),
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, FetchError> {
        self.record(Call::Page {
            playlist: playlist_id.to_string(),
            offset,
            limit,
        });

        if self
            .failing_pages
            .contains(&(playlist_id.to_string(), offset))
        {
            return Err(FetchError::Status {
                url: format!("{}/playlists/{}/tracks", API, playlist_id),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            });
        }

        let playlists = self.playlists.lock().unwrap();
        let items = playlists.get(playlist_id).cloned().unwrap_or_default();
        Ok(items.into_iter().skip(offset).take(limit).collect())
    }

    async fn artist_genres(&self, artist_href: &str) -> Result<Vec<String>, FetchError> {
        self.record(Call::Genres(artist_href.to_string()));
        self.genres
            .get(artist_href)
            .cloned()
            .ok_or_else(|| not_found(artist_href.to_string()))
    }

    async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, FetchError> {
        self.record(Call::Features(track_id.to_string()));
        self.features
            .get(track_id)
            .cloned()
            .ok_or_else(|| not_found(format!("{}/audio-features/{}", API, track_id)))
    }

    async fn remove_track(&self, playlist_id: &str, track_uri: &str) -> Result<(), MutationError> {
        self.record(Call::Remove {
            playlist: playlist_id.to_string(),
            uri: track_uri.to_string(),
        });

        let mut playlists = self.playlists.lock().unwrap();
        if let Some(items) = playlists.get_mut(playlist_id) {
            items.retain(|item| {
                item.track
                    .as_ref()
                    .is_none_or(|t| t.uri().as_deref() != Some(track_uri))
            });
        }
        Ok(())
    }

    async fn add_track(&self, playlist_id: &str, track_uri: &str) -> Result<(), MutationError> {
        self.record(Call::Add {
            playlist: playlist_id.to_string(),
            uri: track_uri.to_string(),
        });

        if self.failing_adds.contains(track_uri) {
            return Err(MutationError::Status {
                method: "POST",
                url: format!("{}/playlists/{}/tracks", API, playlist_id),
                status: StatusCode::FORBIDDEN,
                body: String::new(),
            });
        }

        let id = track_uri.rsplit(':').next().unwrap_or_default();
        self.playlists
            .lock()
            .unwrap()
            .entry(playlist_id.to_string())
            .or_default()
            .push(PlaylistItem {
                track: Some(track(id, &format!("Track {}", id), &[]).into()),
            });
        Ok(())
    }
}

pub fn artist_href(artist_id: &str) -> String {
    format!("{}/artists/{}", API, artist_id)
}

pub fn track(id: &str, name: &str, artist_ids: &[&str]) -> Track {
    Track {
        name: name.to_string(),
        href: format!("{}/tracks/{}", API, id),
        artists: artist_ids
            .iter()
            .map(|a| ArtistRef {
                name: format!("Artist {}", a),
                href: artist_href(a),
            })
            .collect(),
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{}", id)),
        },
    }
}

/// `n` tracks with ids `t0`, `t1`, ...
pub fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| track(&format!("t{}", i), &format!("Track {}", i), &[]))
        .collect()
}

pub fn features(energy: f64) -> AudioFeatures {
    AudioFeatures {
        danceability: 0.5,
        energy,
        key: 5,
        loudness: -6.5,
        mode: 1,
        speechiness: 0.04,
        acousticness: 0.1,
        instrumentalness: 0.0,
        liveness: 0.12,
        valence: 0.6,
        tempo: 120.0,
        duration_ms: 210_000,
        time_signature: 4,
    }
}

pub fn enriched(id: &str, genres: &[&str], energy: f64) -> EnrichedTrack {
    EnrichedTrack {
        track: track(id, &format!("Track {}", id), &["a"]),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        audio_features: features(energy),
    }
}

/// A local file entry: no href, artists without href.
pub fn local_file(name: &str) -> ListedTrack {
    ListedTrack {
        name: Some(name.to_string()),
        href: None,
        uri: Some(format!("spotify:local:Someone:Somewhere:{}:180", name)),
        kind: Some("track".to_string()),
        is_local: true,
        artists: Some(vec![ListedArtist {
            name: Some("Someone".to_string()),
            href: None,
        }]),
        external_urls: Some(ExternalUrls::default()),
    }
}

/// A podcast episode entry: no artists.
pub fn episode(id: &str) -> ListedTrack {
    ListedTrack {
        name: Some(format!("Episode {}", id)),
        href: Some(format!("{}/episodes/{}", API, id)),
        uri: Some(format!("spotify:episode:{}", id)),
        kind: Some("episode".to_string()),
        is_local: false,
        artists: None,
        external_urls: None,
    }
}
