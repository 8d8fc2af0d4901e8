use crate::{error::FetchError, types::AudioFeatures};

use super::SpotifyClient;

impl SpotifyClient {
    pub fn audio_features_url(&self, track_id: &str) -> String {
        format!(
            "{uri}/audio-features/{id}",
            uri = self.api_url,
            id = track_id
        )
    }

    /// Retrieves the audio features of a single track.
    pub(crate) async fn get_audio_features(
        &self,
        track_id: &str,
    ) -> Result<AudioFeatures, FetchError> {
        let url = self.audio_features_url(track_id);
        self.get_json::<AudioFeatures>(&url).await
    }
}
