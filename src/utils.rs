use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

use crate::types::{ArtistRef, EnrichedTrack, TierTableRow};

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Appends every genre of `incoming` to `genres` that is not already there,
/// keeping first-seen order.
pub fn merge_genres(genres: &mut Vec<String>, incoming: Vec<String>) {
    for genre in incoming {
        if !genres.contains(&genre) {
            genres.push(genre);
        }
    }
}

pub fn join_artist_names(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}

pub fn tier_table_rows(tracks: &[EnrichedTrack]) -> Vec<TierTableRow> {
    tracks
        .iter()
        .map(|t| TierTableRow {
            name: t.track.name.clone(),
            artists: join_artist_names(&t.track.artists),
            energy: format!("{:.3}", t.audio_features.energy),
            tier: t.tier().to_string(),
        })
        .collect()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub fn progress_bar(len: usize, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}
