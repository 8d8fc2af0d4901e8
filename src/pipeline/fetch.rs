use crate::{
    error::FetchError,
    management::{PLAYLIST_ITEMS, SnapshotStore},
    spotify::SpotifyApi,
    types::{ListedTrack, Track},
    utils, warning,
};

/// Number of items requested per page.
pub const PAGE_SIZE: usize = 100;

/// Reads every entry of a playlist.
///
/// Pages of [`PAGE_SIZE`] are requested at offsets 0, 100, 200, ... until a
/// page comes back empty; the total reported by the API is never consulted.
/// A failing page fails the whole read. Items without a track (removed from
/// the catalog) count towards the page but are skipped.
pub async fn collect_items(
    api: &dyn SpotifyApi,
    playlist_id: &str,
) -> Result<Vec<ListedTrack>, FetchError> {
    let mut entries: Vec<ListedTrack> = Vec::new();
    let mut offset = 0;

    loop {
        let items = api.playlist_items(playlist_id, offset, PAGE_SIZE).await?;
        if items.is_empty() {
            break;
        }

        let page_len = items.len();
        let before = entries.len();
        entries.extend(items.into_iter().filter_map(|item| item.track));

        let skipped = page_len - (entries.len() - before);
        if skipped > 0 {
            warning!(
                "Skipped {} unavailable item(s) at offset {} of playlist {}",
                skipped,
                offset,
                playlist_id
            );
        }

        offset += PAGE_SIZE;
    }

    Ok(entries)
}

/// Reads every catalog track of a playlist, in playlist order.
///
/// Local files and podcast episodes have no audio features and are skipped
/// with a warning.
pub async fn collect_pages(
    api: &dyn SpotifyApi,
    playlist_id: &str,
) -> Result<Vec<Track>, FetchError> {
    let entries = collect_items(api, playlist_id).await?;

    let mut tracks: Vec<Track> = Vec::with_capacity(entries.len());
    for entry in entries {
        let label = entry.label();
        let kind = if entry.is_local {
            "local file"
        } else if entry.is_episode() {
            "episode"
        } else {
            "entry without href"
        };

        match entry.into_track() {
            Some(track) => tracks.push(track),
            None => warning!("Skipped {} \"{}\" in playlist {}", kind, label, playlist_id),
        }
    }

    Ok(tracks)
}

/// Fetches the source playlist and checkpoints the raw tracks.
///
/// The tracks are written to the `playlist_items.json` snapshot before they
/// are returned.
pub async fn fetch_all(
    api: &dyn SpotifyApi,
    playlist_id: &str,
    store: &SnapshotStore,
) -> Result<Vec<Track>, FetchError> {
    let pb = utils::spinner("Fetching playlist tracks...");
    let result = collect_pages(api, playlist_id).await;
    pb.finish_and_clear();

    let tracks = result?;
    store.persist(PLAYLIST_ITEMS, &tracks).await?;
    Ok(tracks)
}
