use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Tracks at or above this energy go to the heavy playlist.
pub const HEAVY_ENERGY: f64 = 0.666;
/// Tracks at or below this energy go to the light playlist.
pub const LIGHT_ENERGY: f64 = 0.333;

/// Access token returned by the accounts service.
///
/// Held in memory for a single run and never written to disk.
#[derive(Clone, Deserialize)]
pub struct BearerToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(skip, default = "Utc::now")]
    pub obtained_at: DateTime<Utc>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl BearerToken {
    /// Wraps a token that was obtained out-of-band, e.g. from the environment.
    pub fn from_raw(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            expires_in: 0,
            obtained_at: Utc::now(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.access_token
    }

    /// Expiry as reported by the provider, `None` when it was not reported.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expires_in == 0 {
            return None;
        }
        Some(self.obtained_at + Duration::seconds(self.expires_in as i64))
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Login in progress: the `state` sent to the authorize endpoint and, once
/// the callback exchanged the code, the resulting token.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub state: String,
    pub token: Option<BearerToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub href: String,
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl Track {
    /// Spotify id, the last path segment of the track's href.
    pub fn id(&self) -> &str {
        resource_id(&self.href)
    }

    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.id())
    }

    /// Public URL of the track, empty when the API did not return one.
    pub fn url(&self) -> &str {
        self.external_urls.spotify.as_deref().unwrap_or_default()
    }
}

/// Returns the last non-empty path segment of an API href, without query.
pub fn resource_id(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Artist reference as it appears in a playlist listing. Local files carry
/// artists without an href.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedArtist {
    pub name: Option<String>,
    pub href: Option<String>,
}

/// A playlist entry as returned by the listing endpoint.
///
/// Besides catalog tracks a playlist can hold local files (`is_local`, no
/// href) and podcast episodes (`type` is `"episode"`, no artists), so every
/// field that either of them lacks is optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedTrack {
    pub name: Option<String>,
    pub href: Option<String>,
    pub uri: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_local: bool,
    pub artists: Option<Vec<ListedArtist>>,
    pub external_urls: Option<ExternalUrls>,
}

impl ListedTrack {
    pub fn is_episode(&self) -> bool {
        self.kind.as_deref().is_some_and(|kind| kind != "track")
    }

    /// URI to address the entry in playlist mutations. Falls back to the
    /// track URI derived from the href when the listing did not include one.
    pub fn uri(&self) -> Option<String> {
        self.uri.clone().or_else(|| {
            self.href
                .as_deref()
                .map(|href| format!("spotify:track:{}", resource_id(href)))
        })
    }

    /// Name for log output: the title, else the URI.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.uri())
            .unwrap_or_else(|| "<unnamed>".to_string())
    }

    /// Converts a catalog track into a [`Track`]. Local files, episodes and
    /// entries without an href yield `None`.
    pub fn into_track(self) -> Option<Track> {
        if self.is_local || self.is_episode() {
            return None;
        }

        let href = self.href?;
        let artists = self
            .artists
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| {
                Some(ArtistRef {
                    name: a.name.unwrap_or_default(),
                    href: a.href?,
                })
            })
            .collect();

        Some(Track {
            name: self.name.unwrap_or_default(),
            href,
            artists,
            external_urls: self.external_urls.unwrap_or_default(),
        })
    }
}

impl From<Track> for ListedTrack {
    fn from(track: Track) -> Self {
        Self {
            uri: Some(track.uri()),
            name: Some(track.name),
            href: Some(track.href),
            kind: Some("track".to_string()),
            is_local: false,
            artists: Some(
                track
                    .artists
                    .into_iter()
                    .map(|a| ListedArtist {
                        name: Some(a.name),
                        href: Some(a.href),
                    })
                    .collect(),
            ),
            external_urls: Some(track.external_urls),
        }
    }
}

/// One entry of a playlist's track listing. `track` is null for tracks
/// that were removed from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<ListedTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistGenres {
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub key: i32,
    pub loudness: f64,
    pub mode: i32,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    pub duration_ms: u64,
    pub time_signature: i32,
}

/// A track with its genres and audio features attached.
///
/// Serializes as the track object with `genres` and `audio_features` added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTrack {
    #[serde(flatten)]
    pub track: Track,
    pub genres: Vec<String>,
    pub audio_features: AudioFeatures,
}

impl EnrichedTrack {
    pub fn tier(&self) -> Tier {
        Tier::from_energy(self.audio_features.energy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Heavy,
    Medium,
    Light,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Heavy, Tier::Medium, Tier::Light];

    /// `>= 0.666` is heavy, `<= 0.333` is light, everything between is medium.
    pub fn from_energy(energy: f64) -> Self {
        if energy >= HEAVY_ENERGY {
            Tier::Heavy
        } else if energy <= LIGHT_ENERGY {
            Tier::Light
        } else {
            Tier::Medium
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Heavy => "heavy",
            Tier::Medium => "medium",
            Tier::Light => "light",
        };
        f.write_str(name)
    }
}

/// The three playlists tracks are redistributed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub heavy: String,
    pub medium: String,
    pub light: String,
}

impl Destinations {
    pub fn playlist(&self, tier: Tier) -> &str {
        match tier {
            Tier::Heavy => &self.heavy,
            Tier::Medium => &self.medium,
            Tier::Light => &self.light,
        }
    }
}

#[derive(Tabled)]
pub struct TierTableRow {
    pub name: String,
    pub artists: String,
    pub energy: String,
    pub tier: String,
}
