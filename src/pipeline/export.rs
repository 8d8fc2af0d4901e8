use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use serde::Serialize;

use crate::{
    error::ExportError,
    management::{EXPORTED_TRACKS, SnapshotStore},
    types::EnrichedTrack,
    utils,
};

/// Spreadsheet header, in column order.
pub const COLUMNS: [&str; 17] = [
    "name",
    "artist",
    "genres",
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
    "duration_ms",
    "time_signature",
    "url",
];

/// One flattened spreadsheet row. Field order matches [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRow {
    pub name: String,
    pub artist: String,
    pub genres: String,
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
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl TrackRow {
    pub fn from_track(t: &EnrichedTrack) -> Self {
        let f = &t.audio_features;
        Self {
            name: t.track.name.clone(),
            artist: utils::join_artist_names(&t.track.artists),
            genres: t.genres.join(", "),
            danceability: f.danceability,
            energy: f.energy,
            key: f.key,
            loudness: f.loudness,
            mode: f.mode,
            speechiness: f.speechiness,
            acousticness: f.acousticness,
            instrumentalness: f.instrumentalness,
            liveness: f.liveness,
            valence: f.valence,
            tempo: f.tempo,
            duration_ms: f.duration_ms,
            time_signature: f.time_signature,
            url: t.track.url().to_string(),
        }
    }

    pub fn cells(&self) -> [Cell; 17] {
        [
            Cell::Text(self.name.clone()),
            Cell::Text(self.artist.clone()),
            Cell::Text(self.genres.clone()),
            Cell::Number(self.danceability),
            Cell::Number(self.energy),
            Cell::Number(self.key as f64),
            Cell::Number(self.loudness),
            Cell::Number(self.mode as f64),
            Cell::Number(self.speechiness),
            Cell::Number(self.acousticness),
            Cell::Number(self.instrumentalness),
            Cell::Number(self.liveness),
            Cell::Number(self.valence),
            Cell::Number(self.tempo),
            Cell::Number(self.duration_ms as f64),
            Cell::Number(self.time_signature as f64),
            Cell::Text(self.url.clone()),
        ]
    }
}

pub fn flatten(tracks: &[EnrichedTrack]) -> Vec<TrackRow> {
    tracks.iter().map(TrackRow::from_track).collect()
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub rows: usize,
    pub spreadsheet: PathBuf,
    pub document: PathBuf,
}

/// Writes the spreadsheet and the `playlist_tracks.json` document.
///
/// Both targets are overwritten if they exist.
pub async fn export(
    tracks: &[EnrichedTrack],
    store: &SnapshotStore,
    spreadsheet: &Path,
) -> Result<ExportSummary, ExportError> {
    let rows = flatten(tracks);

    if let Some(parent) = spreadsheet.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }
    write_spreadsheet(&rows, spreadsheet)?;

    let document = store.persist(EXPORTED_TRACKS, tracks).await?;

    Ok(ExportSummary {
        rows: rows.len(),
        spreadsheet: spreadsheet.to_path_buf(),
        document,
    })
}

/// Writes one sheet with a header row and no index column. A `.csv`
/// extension selects CSV, anything else produces an `.xlsx` workbook.
pub fn write_spreadsheet(rows: &[TrackRow], path: &Path) -> Result<(), ExportError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        write_csv(rows, path)
    } else {
        write_xlsx(rows, path)
    }
}

fn write_csv(rows: &[TrackRow], path: &Path) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_xlsx(rows: &[TrackRow], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells().into_iter().enumerate() {
            match cell {
                Cell::Text(text) => worksheet.write_string(r, col as u16, &text)?,
                Cell::Number(n) => worksheet.write_number(r, col as u16, n)?,
            };
        }
    }

    workbook.save(path)?;
    Ok(())
}
