//! Playback time model and elapsed-time labels.
//!
//! # Design
//!
//! Playback advances in logical ticks, one per fixed wall-clock interval
//! (1 s by default), independent of the host's frame rate.  The host feeds
//! elapsed milliseconds into a [`PlaybackClock`] every frame; the clock
//! reports when a tick is due.
//!
//! Labels such as "3 days ago" are produced by [`elapsed_label`] from fixed
//! unit lengths; a "month" is always 30 days and a "year" 365.

use std::fmt;

use chrono::{DateTime, Utc};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A logical playback tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── PlaybackClock ─────────────────────────────────────────────────────────────

/// Fixed-rate tick source driven by elapsed wall time.
///
/// At most one tick fires per [`advance`][Self::advance] call; time beyond
/// the interval is dropped rather than queued, so a long stall never causes
/// a burst of catch-up ticks.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    /// Milliseconds of wall time per logical tick.
    pub interval_ms: u64,
    /// Wall time accumulated since the last tick (or restart).
    pub accumulated_ms: u64,
    /// Ticks fired so far.
    pub current_tick: Tick,
}

impl PlaybackClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
            current_tick: Tick::ZERO,
        }
    }

    /// Add `elapsed_ms` of wall time.  Returns `true` when a tick is due, in
    /// which case the interval restarts.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms = 0;
            self.current_tick = self.current_tick.offset(1);
            true
        } else {
            false
        }
    }

    /// Restart the current interval without firing a tick.
    #[inline]
    pub fn restart(&mut self) {
        self.accumulated_ms = 0;
    }
}

impl fmt::Display for PlaybackClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} ms)", self.current_tick, self.accumulated_ms)
    }
}

// ── Elapsed-time labels ───────────────────────────────────────────────────────

/// Label units, largest first.
const UNITS: [(u64, &str); 6] = [
    (31_536_000, "year"),
    (2_592_000,  "month"),
    (604_800,    "week"),
    (86_400,     "day"),
    (3_600,      "hour"),
    (60,         "minute"),
];

/// Coarse "how long ago" label for an activity that started at `start`.
pub fn elapsed_label(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    label_for_secs((now - start).num_seconds())
}

/// Coarse label for a duration in seconds.  Negative durations count as 0.
pub fn label_for_secs(seconds: i64) -> String {
    let seconds = seconds.max(0) as u64;
    for (divisor, unit) in UNITS {
        let n = seconds / divisor;
        if n >= 1 {
            let plural = if n > 1 { "s" } else { "" };
            return format!("{n} {unit}{plural} ago");
        }
    }
    "Just now".to_owned()
}
