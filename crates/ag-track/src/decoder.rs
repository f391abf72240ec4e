//! Fold logical records into a projected [`Track`].

use chrono::{DateTime, Utc};
use tracing::debug;

use ag_core::{ActivityKind, GeoCoord, Projector};

use crate::{GeoPoint, LogicalRecord, RecordSource, Track, TrackResult};

/// Decodes record streams against one session's reference origin.
#[derive(Copy, Clone, Debug)]
pub struct TrackDecoder {
    projector: Projector,
}

/// Running state of the fold.
struct Decoded {
    points:     Vec<GeoPoint>,
    activity:   ActivityKind,
    start_time: DateTime<Utc>,
    skipped:    usize,
}

impl Decoded {
    fn apply(mut self, record: LogicalRecord, projector: &Projector) -> Self {
        match record {
            LogicalRecord::Sample { lat, lon, speed } => match speed {
                Some(speed) if speed > 0.0 => {
                    let p = projector.project(GeoCoord::new(lat, lon));
                    self.points.push(GeoPoint::new(p.x, p.y, speed));
                }
                _ => self.skipped += 1,
            },
            LogicalRecord::SessionSummary { start_time, activity } => {
                self.start_time = start_time;
                self.activity = activity.unwrap_or_default();
            }
        }
        self
    }
}

impl TrackDecoder {
    pub fn new(projector: Projector) -> Self {
        Self { projector }
    }

    #[inline]
    pub fn projector(&self) -> Projector {
        self.projector
    }

    /// Decode `records` in order.  `created_at` is the start time used when
    /// no session summary is present.
    ///
    /// Never fails: a stream with no usable samples produces a track that
    /// reports `!is_usable()`.
    pub fn decode<I>(&self, records: I, created_at: DateTime<Utc>) -> Track
    where
        I: IntoIterator<Item = LogicalRecord>,
    {
        let init = Decoded {
            points:     Vec::new(),
            activity:   ActivityKind::default(),
            start_time: created_at,
            skipped:    0,
        };
        let decoded = records
            .into_iter()
            .fold(init, |acc, record| acc.apply(record, &self.projector));

        debug!(
            points = decoded.points.len(),
            skipped = decoded.skipped,
            activity = %decoded.activity,
            "decoded track"
        );
        Track::new(decoded.points, decoded.activity, decoded.start_time)
    }

    /// Read every record from `source` and decode them.
    pub fn decode_source<S: RecordSource + ?Sized>(&self, source: &S) -> TrackResult<Track> {
        let records = source.records()?;
        Ok(self.decode(records, source.created_at()))
    }
}
