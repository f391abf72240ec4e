//! `ag-track`: from recorded activity files to playable tracks.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`record`]  | `LogicalRecord` (`Sample` / `SessionSummary`), `RecordSource` |
//! | [`track`]   | `Track`, `GeoPoint`                                          |
//! | [`decoder`] | `TrackDecoder`: fold records into a projected `Track`        |
//! | [`loader`]  | `CsvActivityFile`, `read_records`: CSV record source         |
//! | [`error`]   | `TrackError`, `TrackResult<T>`                               |
//!
//! # Decoding model
//!
//! A record source yields logical records in file order.  The decoder folds
//! them once: moving samples are projected against the session's reference
//! origin and appended; a session summary, wherever it appears, overrides
//! the start time and activity kind.  A track with fewer than two points is
//! not playable, and callers drop it without raising an error.

pub mod decoder;
pub mod error;
pub mod loader;
pub mod record;
pub mod track;


pub use decoder::TrackDecoder;
pub use error::{TrackError, TrackResult};
pub use loader::{CsvActivityFile, read_records};
pub use record::{LogicalRecord, MemorySource, RecordSource};
pub use track::{GeoPoint, Track};
