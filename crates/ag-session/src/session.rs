//! The `GhostSession` struct: a set of ghosts sharing one world and clock.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use ag_core::{EmbodimentKind, GhostConfig, GhostId, LocalPoint, PlaybackClock, SessionRng, Tick, elapsed_label};
use ag_playback::{Ghost, TickOutcome, World};
use ag_track::Track;

use crate::SessionObserver;

// ── Labels ────────────────────────────────────────────────────────────────────

/// An elapsed-time label to draw above one ghost.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostLabel {
    pub ghost:    GhostId,
    pub position: LocalPoint,
    pub text:     String,
}

// ── Stagger ───────────────────────────────────────────────────────────────────

/// Sideways shift for the first point of the `n`-th loaded ghost, so ghosts
/// starting together fan out around the player instead of overlapping.
///
/// Ghosts alternate sides at growing distance: -1, +1, -2, +2, … metres.
/// The shift is along y when the player faces roughly east or west
/// (heading in (45°, 135°) or (225°, 315°)), along x otherwise.
pub fn stagger_offset(n: usize, player_heading: f32) -> (f64, f64) {
    let mut offset = (n / 2 + 1) as f64;
    if n % 2 == 0 {
        offset = -offset;
    }

    let h = player_heading.rem_euclid(360.0);
    if (h > 45.0 && h < 135.0) || (h > 225.0 && h < 315.0) {
        (0.0, offset)
    } else {
        (offset, 0.0)
    }
}

// ── GhostSession ──────────────────────────────────────────────────────────────

/// Owns the host world and every ghost played in it.
///
/// Ghosts are identified by [`GhostId`] in load order.  All playback happens
/// on the caller's thread: feed wall time to [`advance`][Self::advance]
/// every frame and the session ticks every ghost once per configured
/// interval.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct GhostSession<W: World> {
    /// Validated session configuration.
    pub config: GhostConfig,

    /// The host world.  Exposed so the caller can run its own frame loop
    /// (for a [`HeadlessWorld`][ag_playback::HeadlessWorld], `step`).
    pub world: W,

    pub(crate) ghosts: Vec<Ghost>,
    pub(crate) rng:    SessionRng,
    pub(crate) clock:  PlaybackClock,
    /// Logical ticks played so far.
    pub(crate) tick:   Tick,
    /// Where the player stood when ghosts were loaded.
    pub(crate) start:  Option<LocalPoint>,
}

impl<W: World> GhostSession<W> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghost(&self, id: GhostId) -> Option<&Ghost> {
        self.ghosts.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ghosts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ghosts.is_empty()
    }

    /// Number of ghosts still advancing.
    pub fn active_count(&self) -> usize {
        self.ghosts.iter().filter(|g| !g.is_finished()).count()
    }

    #[inline]
    pub fn start_position(&self) -> Option<LocalPoint> {
        self.start
    }

    #[inline]
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Spawn a ghost for every usable track.
    ///
    /// Each track's first point is shifted by [`stagger_offset`].  Model
    /// variants are drawn at random from what the world offers, and every
    /// ghost is spawned with the configured opacity.  Tracks that
    /// are too short or that the world cannot embody are skipped.
    ///
    /// Returns the number of ghosts spawned by this call.
    pub fn load<I>(&mut self, tracks: I, player_position: LocalPoint, player_heading: f32) -> usize
    where
        I: IntoIterator<Item = Track>,
    {
        let mut loaded = 0;
        let alpha = self.config.alpha();

        for track in tracks {
            if !track.is_usable() {
                warn!(points = track.len(), "skipping track too short to play");
                continue;
            }

            let (dx, dy) = stagger_offset(self.ghosts.len(), player_heading);
            let track = track.with_start_offset(dx, dy);
            let variant = self.pick_variant(track.activity().embodiment());

            match Ghost::spawn(track, variant, alpha, &mut self.world) {
                Ok(ghost) => {
                    self.ghosts.push(ghost);
                    loaded += 1;
                }
                Err(e) => warn!(error = %e, "skipping ghost"),
            }
        }

        if !self.ghosts.is_empty() {
            self.start = Some(player_position);
        }
        info!(loaded, total = self.ghosts.len(), "ghosts loaded");
        loaded
    }

    fn pick_variant(&mut self, kind: EmbodimentKind) -> u32 {
        match self.world.variant_count(kind) {
            // Let the world report the missing asset.
            0 => 0,
            n => self.rng.gen_range(0..n),
        }
    }

    // ── Playback ──────────────────────────────────────────────────────────

    /// Feed `elapsed_ms` of wall time.  Plays one tick when the configured
    /// interval has elapsed and returns whether it did.
    pub fn advance<O: SessionObserver>(&mut self, elapsed_ms: u64, observer: &mut O) -> bool {
        if self.clock.advance(elapsed_ms) {
            self.tick_all(observer);
            true
        } else {
            false
        }
    }

    /// Tick every ghost once, in load order.  Returns the number of ghosts
    /// still advancing afterwards.
    pub fn tick_all<O: SessionObserver>(&mut self, observer: &mut O) -> usize {
        let now = self.tick;
        observer.on_tick_start(now);

        for (i, ghost) in self.ghosts.iter_mut().enumerate() {
            let id = GhostId(i as u32);
            match ghost.tick(&mut self.world) {
                TickOutcome::Advanced { index, correction, .. } => {
                    observer.on_ghost_advanced(now, id, index, correction);
                }
                TickOutcome::Completed => {
                    debug!(ghost = %id, tick = %now, "ghost reached end of track");
                    observer.on_ghost_finished(now, id);
                }
                TickOutcome::Idle => {}
            }
        }

        let active = self.active_count();
        observer.on_tick_end(now, active);
        self.tick = now.offset(1);
        active
    }

    /// Re-anchor every ghost at its track point nearest `position` and
    /// restart the tick interval.
    pub fn regroup_all(&mut self, position: LocalPoint) {
        for ghost in &mut self.ghosts {
            ghost.regroup(&mut self.world, position);
        }
        self.clock.restart();
        info!(ghosts = self.ghosts.len(), %position, "ghosts regrouped");
    }

    /// Remove every ghost's agent from the world.
    pub fn clear(&mut self) {
        let removed = self.ghosts.len();
        for ghost in self.ghosts.drain(..) {
            ghost.despawn(&mut self.world);
        }
        self.start = None;
        self.clock.restart();
        info!(removed, "ghosts cleared");
    }

    // ── Labels ────────────────────────────────────────────────────────────

    /// "N days ago" labels for ghosts within `label_range_m` of `viewer`.
    /// Empty when dates are disabled.
    pub fn labels(&self, now: DateTime<Utc>, viewer: LocalPoint) -> Vec<GhostLabel> {
        if !self.config.show_date {
            return Vec::new();
        }

        self.ghosts
            .iter()
            .enumerate()
            .filter_map(|(i, ghost)| {
                let position = self.world.position(ghost.agent());
                (position.distance_to(viewer) < self.config.label_range_m).then(|| GhostLabel {
                    ghost: GhostId(i as u32),
                    position,
                    text: elapsed_label(ghost.track().start_time(), now),
                })
            })
            .collect()
    }
}
