//! CSV record source.
//!
//! # CSV format
//!
//! One logical record per row, in file order.
//!
//! ```csv
//! kind,lat,lon,speed,start_time,sport
//! sample,-19.1060,-169.8705,3.2,,
//! sample,-19.1058,-169.8701,,,
//! session,,,,2023-05-01T08:00:00Z,2
//! ```
//!
//! | `kind`    | Required fields      | Optional fields |
//! |-----------|----------------------|-----------------|
//! | `sample`  | `lat`, `lon` (deg)   | `speed` (m/s)   |
//! | `session` | `start_time` (RFC 3339) | `sport` (fitness sport code) |

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{LogicalRecord, RecordSource, TrackError, TrackResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RecordRow {
    kind:       String,
    lat:        Option<f64>,
    lon:        Option<f64>,
    speed:      Option<f32>,
    start_time: Option<String>,
    sport:      Option<u8>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse every record from a CSV reader.
///
/// Useful for testing (pass a `std::io::Cursor`) or for sources that are not
/// plain files.
pub fn read_records<R: Read>(reader: R) -> TrackResult<Vec<LogicalRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize::<RecordRow>().enumerate() {
        let row = result?;
        // +2: one for the header, one for 1-based numbering.
        records.push(parse_row(row, i + 2)?);
    }

    Ok(records)
}

/// An activity stored as a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvActivityFile {
    path:       PathBuf,
    created_at: DateTime<Utc>,
}

impl CsvActivityFile {
    /// Stat `path` and remember its creation time (falling back to the
    /// modification time, then to now, on filesystems that lack one).
    pub fn open(path: &Path) -> TrackResult<Self> {
        let meta = std::fs::metadata(path)?;
        let created_at = meta
            .created()
            .or_else(|_| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        Ok(Self { path: path.to_path_buf(), created_at })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directory, used as the catalog key.  `None` when
    /// the name is not valid UTF-8, since such a key could not be joined
    /// back into the same path.
    pub fn name(&self) -> Option<&str> {
        self.path.file_name()?.to_str()
    }
}

impl RecordSource for CsvActivityFile {
    fn records(&self) -> TrackResult<Vec<LogicalRecord>> {
        read_records(File::open(&self.path)?)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_row(row: RecordRow, line: usize) -> TrackResult<LogicalRecord> {
    match row.kind.trim() {
        "sample" => match (row.lat, row.lon) {
            (Some(lat), Some(lon)) => Ok(LogicalRecord::sample(lat, lon, row.speed)),
            _ => Err(TrackError::Parse(format!("line {line}: sample without lat/lon"))),
        },
        "session" => {
            let raw = row.start_time.as_deref().map(str::trim).unwrap_or_default();
            let start_time = DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| {
                    TrackError::Parse(format!("line {line}: invalid start_time {raw:?}: {e}"))
                })?;
            Ok(LogicalRecord::session(start_time, row.sport))
        }
        other => Err(TrackError::Parse(format!(
            "line {line}: unknown record kind {other:?}: expected \"sample\" or \"session\""
        ))),
    }
}
