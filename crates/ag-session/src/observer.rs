//! Session observer trait for progress reporting.

use ag_core::{GhostId, Tick};
use ag_playback::Correction;

/// Callbacks invoked by [`GhostSession::tick_all`][crate::GhostSession::tick_all]
/// as it plays each logical tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: finish reporter
///
/// ```rust,ignore
/// struct FinishReporter;
///
/// impl SessionObserver for FinishReporter {
///     fn on_ghost_finished(&mut self, tick: Tick, ghost: GhostId) {
///         println!("{tick}: {ghost} finished");
///     }
/// }
/// ```
pub trait SessionObserver {
    /// Called before any ghost is ticked.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when a ghost moved on to track point `index`.
    fn on_ghost_advanced(
        &mut self,
        _tick:       Tick,
        _ghost:      GhostId,
        _index:      usize,
        _correction: Correction,
    ) {}

    /// Called once when a ghost runs out of track.
    fn on_ghost_finished(&mut self, _tick: Tick, _ghost: GhostId) {}

    /// Called after every ghost has been ticked.  `active` is the number of
    /// ghosts still advancing.
    fn on_tick_end(&mut self, _tick: Tick, _active: usize) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
