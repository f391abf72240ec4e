//! The playable track: projected points, activity kind, start time.

use chrono::{DateTime, Utc};

use ag_core::{ActivityKind, LocalPoint};

/// One projected sample: metres from the reference origin plus the speed
/// recorded at that fix.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoPoint {
    pub x:     f64,
    pub y:     f64,
    /// Metres/second, always > 0 for decoded points.
    pub speed: f32,
}

impl GeoPoint {
    #[inline]
    pub fn new(x: f64, y: f64, speed: f32) -> Self {
        Self { x, y, speed }
    }

    #[inline]
    pub fn position(&self) -> LocalPoint {
        LocalPoint::new(self.x, self.y)
    }
}

/// A decoded activity, ready to be handed to exactly one playback engine.
///
/// Points are in playback order.  They are not evenly spaced in time; each
/// playback tick simply consumes the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    points:     Vec<GeoPoint>,
    activity:   ActivityKind,
    start_time: DateTime<Utc>,
}

impl Track {
    /// Fewest points a track needs to be played back.
    pub const MIN_POINTS: usize = 2;

    pub fn new(points: Vec<GeoPoint>, activity: ActivityKind, start_time: DateTime<Utc>) -> Self {
        Self { points, activity, start_time }
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn activity(&self) -> ActivityKind {
        self.activity
    }

    #[inline]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// `true` if the track has at least [`MIN_POINTS`][Self::MIN_POINTS].
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.points.len() >= Self::MIN_POINTS
    }

    #[inline]
    pub fn point(&self, index: usize) -> Option<&GeoPoint> {
        self.points.get(index)
    }

    /// Heading (see [`LocalPoint::heading_to`]) from point `index` toward
    /// point `index + 1`, or `None` if `index` has no successor.
    pub fn heading_at(&self, index: usize) -> Option<f32> {
        let from = self.points.get(index)?;
        let to = self.points.get(index + 1)?;
        Some(from.position().heading_to(to.position()))
    }

    /// Index of the point nearest `query` in the plane.  Ties resolve to the
    /// earliest point.  `None` for an empty track.
    pub fn nearest_index(&self, query: LocalPoint) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.position().distance_to(query);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Shift the first point by `(dx, dy)`.  Used to stagger ghosts that
    /// start from the same place.
    pub fn with_start_offset(mut self, dx: f64, dy: f64) -> Self {
        if let Some(first) = self.points.first_mut() {
            first.x += dx;
            first.y += dy;
        }
        self
    }
}
