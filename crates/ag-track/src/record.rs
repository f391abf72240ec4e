//! Logical records yielded by an activity-file source.

use chrono::{DateTime, Utc};

use ag_core::{ActivityKind, GeoCoord};

use crate::TrackResult;

/// One logical record from an activity file, already separated from the
/// file's byte-level framing.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalRecord {
    /// A position fix.  `speed` is metres/second; fixes with no speed or a
    /// non-positive one are stationary and are not part of the track.
    Sample {
        lat:   f64,
        lon:   f64,
        speed: Option<f32>,
    },

    /// Whole-activity summary.  Overrides the track's start time and kind;
    /// an absent kind means cycling.
    SessionSummary {
        start_time: DateTime<Utc>,
        activity:   Option<ActivityKind>,
    },
}

impl LogicalRecord {
    #[inline]
    pub fn sample(lat: f64, lon: f64, speed: Option<f32>) -> Self {
        LogicalRecord::Sample { lat, lon, speed }
    }

    /// A sample whose position is in fitness-file semicircle units.
    pub fn sample_semicircles(lat: i32, lon: i32, speed: Option<f32>) -> Self {
        let c = GeoCoord::from_semicircles(lat, lon);
        LogicalRecord::Sample { lat: c.lat, lon: c.lon, speed }
    }

    /// A session summary carrying a raw fitness-file sport code.
    pub fn session(start_time: DateTime<Utc>, sport: Option<u8>) -> Self {
        LogicalRecord::SessionSummary {
            start_time,
            activity: sport.map(|code| ActivityKind::from_sport_code(Some(code))),
        }
    }
}

/// Anything that can supply the logical records of one activity plus the
/// creation time of the underlying file.
pub trait RecordSource {
    /// All records in file order.
    fn records(&self) -> TrackResult<Vec<LogicalRecord>>;

    /// Creation timestamp of the source file; the start time of a track whose
    /// records carry no session summary.
    fn created_at(&self) -> DateTime<Utc>;
}

/// An in-memory [`RecordSource`].
#[derive(Debug, Clone)]
pub struct MemorySource {
    pub records:    Vec<LogicalRecord>,
    pub created_at: DateTime<Utc>,
}

impl MemorySource {
    pub fn new(records: Vec<LogicalRecord>, created_at: DateTime<Utc>) -> Self {
        Self { records, created_at }
    }
}

impl RecordSource for MemorySource {
    fn records(&self) -> TrackResult<Vec<LogicalRecord>> {
        Ok(self.records.clone())
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
