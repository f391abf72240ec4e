//! Fluent builder for constructing a [`GhostSession`].

use ag_core::{GhostConfig, PlaybackClock, SessionRng, Tick};
use ag_playback::World;

use crate::{GhostSession, SessionResult};

/// Fluent builder for [`GhostSession<W>`].
///
/// # Required inputs
///
/// - [`GhostConfig`]: tick interval, label range, seed, …
/// - `W: World`: the host world ghosts are spawned into
///
/// # Optional inputs (have defaults)
///
/// | Method     | Default                                        |
/// |------------|------------------------------------------------|
/// | `.rng(r)`  | `SessionRng::from_optional_seed(config.seed)`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut session = SessionBuilder::new(config, HeadlessWorld::new()).build()?;
/// session.load(tracks, player, heading);
/// session.advance(16, &mut NoopObserver);
/// ```
pub struct SessionBuilder<W: World> {
    config: GhostConfig,
    world:  W,
    rng:    Option<SessionRng>,
}

impl<W: World> SessionBuilder<W> {
    pub fn new(config: GhostConfig, world: W) -> Self {
        Self { config, world, rng: None }
    }

    /// Use `rng` for embodiment selection instead of one derived from the
    /// configured seed.
    pub fn rng(mut self, rng: SessionRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration and return an empty session.
    pub fn build(self) -> SessionResult<GhostSession<W>> {
        self.config.validate()?;

        let rng = self
            .rng
            .unwrap_or_else(|| SessionRng::from_optional_seed(self.config.seed));

        Ok(GhostSession {
            clock:  PlaybackClock::new(self.config.tick_interval_ms),
            tick:   Tick::ZERO,
            config: self.config,
            world:  self.world,
            ghosts: Vec::new(),
            rng,
            start:  None,
        })
    }
}
