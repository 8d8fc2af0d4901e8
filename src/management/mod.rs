mod snapshot;

pub use snapshot::ENRICHED_ITEMS;
pub use snapshot::EXPORTED_TRACKS;
pub use snapshot::GENRES;
pub use snapshot::PLAYLIST_ITEMS;
pub use snapshot::SPREADSHEET;
pub use snapshot::SnapshotStore;
pub use snapshot::read_json;
pub use snapshot::write_json;
