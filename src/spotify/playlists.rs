use serde_json::json;

use crate::{
    error::{FetchError, MutationError},
    types::{PlaylistItem, PlaylistItemsPage},
};

use super::{SpotifyClient, check_mutation};

/// Fields requested from the playlist listing. `type` and `is_local` tell
/// catalog tracks apart from episodes and local files.
const ITEM_FIELDS: &str =
    "items(track(name,href,uri,type,is_local,external_urls,artists(name,href)))";

impl SpotifyClient {
    /// Builds the listing URL for one page of a playlist.
    pub fn playlist_items_url(&self, playlist_id: &str, offset: usize, limit: usize) -> String {
        format!(
            "{uri}/playlists/{id}/tracks?offset={offset}&limit={limit}&fields={fields}",
            uri = self.api_url,
            id = playlist_id,
            offset = offset,
            limit = limit,
            fields = ITEM_FIELDS
        )
    }

    fn playlist_tracks_url(&self, playlist_id: &str) -> String {
        format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = playlist_id
        )
    }

    pub(crate) async fn get_playlist_items(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, FetchError> {
        let url = self.playlist_items_url(playlist_id, offset, limit);
        let page = self.get_json::<PlaylistItemsPage>(&url).await?;
        Ok(page.items)
    }

    pub(crate) async fn delete_playlist_track(
        &self,
        playlist_id: &str,
        track_uri: &str,
    ) -> Result<(), MutationError> {
        let url = self.playlist_tracks_url(playlist_id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(self.token.as_str())
            .json(&json!({ "tracks": [{ "uri": track_uri }] }))
            .send()
            .await?;

        check_mutation("DELETE", &url, response).await
    }

    pub(crate) async fn post_playlist_track(
        &self,
        playlist_id: &str,
        track_uri: &str,
    ) -> Result<(), MutationError> {
        let url = self.playlist_tracks_url(playlist_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.as_str())
            .json(&json!({ "uris": [track_uri] }))
            .send()
            .await?;

        check_mutation("POST", &url, response).await
    }
}
