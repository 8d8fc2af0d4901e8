use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::SnapshotError;

/// Raw tracks as fetched from the source playlist.
pub const PLAYLIST_ITEMS: &str = "playlist_items.json";
/// Tracks with genres and audio features attached.
pub const ENRICHED_ITEMS: &str = "playlist_items_with_extra_info.json";
/// JSON twin of the spreadsheet export.
pub const EXPORTED_TRACKS: &str = "playlist_tracks.json";
/// Every genre seen across the enriched dataset.
pub const GENRES: &str = "genres.json";
/// Default spreadsheet file name.
pub const SPREADSHEET: &str = "playlist_tracks.xlsx";

/// JSON documents written by the pipeline stages into one output directory.
///
/// Every write replaces the previous document of the same name. The files
/// double as checkpoints: a later stage can be re-run from the last one that
/// made it to disk.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Writes `value` as pretty JSON to `<dir>/<name>` and returns the path.
    pub async fn persist<T>(&self, name: &str, value: &T) -> Result<PathBuf, SnapshotError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path(name);
        write_json(&path, value).await?;
        Ok(path)
    }

    pub async fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, SnapshotError> {
        read_json(&self.path(name)).await
    }
}

pub async fn write_json<T>(path: &Path, value: &T) -> Result<(), SnapshotError>
where
    T: Serialize + ?Sized,
{
    let io_err = |source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| SnapshotError::Serde {
        path: path.display().to_string(),
        source,
    })?;
    async_fs::write(path, json).await.map_err(io_err)
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let content = async_fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| SnapshotError::Serde {
        path: path.display().to_string(),
        source,
    })
}
