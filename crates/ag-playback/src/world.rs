//! The host world, as seen by a ghost.

use ag_core::{AgentHandle, EmbodimentKind, LocalPoint};

use crate::{Gait, WorldError};

/// Alpha of a fully opaque agent.
pub const OPAQUE: u8 = u8::MAX;

/// What to spawn: an embodiment kind plus an opaque variant index into the
/// world's own model catalog.  Callers pick the variant (at random); only
/// the world knows which bicycle or which pedestrian model it denotes.
///
/// `alpha` applies to every entity making up the agent (rider and vehicle
/// alike).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Embodiment {
    pub kind:    EmbodimentKind,
    pub variant: u32,
    pub alpha:   u8,
}

impl Embodiment {
    /// A fully opaque embodiment.
    pub fn new(kind: EmbodimentKind, variant: u32) -> Self {
        Self { kind, variant, alpha: OPAQUE }
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Agent operations a ghost needs from the host world.
///
/// Headings are degrees counter-clockwise from +y (see
/// [`LocalPoint::heading_to`]).  Speeds are metres/second.
///
/// Only [`spawn`][Self::spawn] can fail.  Every other operation targets a
/// handle the world itself issued, and playback never lets a failure
/// escape a tick.
pub trait World {
    /// Number of model variants the world can spawn for `kind`.
    fn variant_count(&self, kind: EmbodimentKind) -> u32;

    /// Create an agent at `at`, facing `heading`.
    fn spawn(
        &mut self,
        embodiment: Embodiment,
        at:         LocalPoint,
        heading:    f32,
    ) -> Result<AgentHandle, WorldError>;

    /// Current position of the agent.
    fn position(&self, agent: AgentHandle) -> LocalPoint;

    /// Current scalar speed of the agent.
    fn speed(&self, agent: AgentHandle) -> f32;

    /// Move the agent instantly.
    fn teleport(&mut self, agent: AgentHandle, to: LocalPoint);

    fn set_heading(&mut self, agent: AgentHandle, heading: f32);

    /// Order the agent to travel toward `target` at `speed`.
    fn move_to(&mut self, agent: AgentHandle, target: LocalPoint, speed: f32);

    /// Set the agent's scalar speed directly.
    fn set_speed(&mut self, agent: AgentHandle, speed: f32);

    /// Start (or restart) a looping gait animation.
    fn play_animation(&mut self, agent: AgentHandle, gait: Gait, rate: f32);

    /// Stop a gait animation started with `play_animation`.
    fn stop_animation(&mut self, agent: AgentHandle, gait: Gait);

    /// Change the playback rate of a running animation.
    fn set_animation_rate(&mut self, agent: AgentHandle, gait: Gait, rate: f32);

    /// Drop every pending movement order.
    fn clear_tasks(&mut self, agent: AgentHandle);

    /// Raise or lower the agent's "finished" marker (map blip colour and
    /// the like).
    fn set_finished(&mut self, agent: AgentHandle, finished: bool);

    /// Dispose of the agent and everything attached to it.
    fn remove(&mut self, agent: AgentHandle);
}
