use crate::{error::FetchError, types::ArtistGenres};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the genre labels of an artist.
    ///
    /// Requests the artist href exactly as the playlist listing returned it.
    /// An artist without genres yields an empty list.
    pub(crate) async fn get_artist_genres(
        &self,
        artist_href: &str,
    ) -> Result<Vec<String>, FetchError> {
        let artist = self.get_json::<ArtistGenres>(artist_href).await?;
        Ok(artist.genres)
    }
}
