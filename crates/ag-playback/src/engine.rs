//! The per-track playback state machine.

use tracing::{debug, trace};

use ag_core::{AgentHandle, EmbodimentKind, LocalPoint};
use ag_track::Track;

use crate::{Embodiment, GaitSelection, Gait, PlaybackError, PlaybackResult, World};

// ── Deviation policy ──────────────────────────────────────────────────────────

/// How far an agent may drift from its track before playback corrects it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeviationPolicy {
    /// Beyond this distance (m) the agent is teleported back onto the track.
    pub snap_m:          f64,
    /// Beyond this distance (m) the agent is sped up to catch up.
    pub catch_up_m:      f64,
    /// Speed multiplier applied while catching up.
    pub catch_up_factor: f32,
}

impl DeviationPolicy {
    pub const VEHICLE: DeviationPolicy = DeviationPolicy {
        snap_m:          20.0,
        catch_up_m:      5.0,
        catch_up_factor: 1.1,
    };

    pub const PEDESTRIAN: DeviationPolicy = DeviationPolicy {
        snap_m:          10.0,
        catch_up_m:      3.0,
        catch_up_factor: 1.1,
    };

    pub fn for_embodiment(kind: EmbodimentKind) -> Self {
        match kind {
            EmbodimentKind::Vehicle    => Self::VEHICLE,
            EmbodimentKind::Pedestrian => Self::PEDESTRIAN,
        }
    }

    /// Correction for an agent `distance` metres from where it should be.
    pub fn classify(&self, distance: f64) -> Correction {
        if distance > self.snap_m {
            Correction::Snap
        } else if distance > self.catch_up_m {
            Correction::CatchUp
        } else {
            Correction::None
        }
    }
}

/// Drift correction applied during one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Correction {
    /// On track; recorded speed used as-is.
    None,
    /// Slightly behind; recorded speed scaled up.
    CatchUp,
    /// Far off; agent teleported back to the track.
    Snap,
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PlaybackState {
    Advancing,
    Finished,
}

/// What one call to [`Ghost::tick`] did.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum TickOutcome {
    /// The cursor moved to `index` and the agent was sent there at `speed`.
    Advanced {
        index:      usize,
        speed:      f32,
        correction: Correction,
    },
    /// The track ran out; the agent was stopped and marked finished.
    Completed,
    /// Already finished; nothing happened.
    Idle,
}

// ── Ghost ─────────────────────────────────────────────────────────────────────

/// Plays one [`Track`] back through one world agent.
///
/// The cursor `index` only moves through [`tick`][Self::tick] and
/// [`regroup`][Self::regroup], and always stays within the track.
#[derive(Debug)]
pub struct Ghost {
    track:      Track,
    agent:      AgentHandle,
    embodiment: EmbodimentKind,
    policy:     DeviationPolicy,
    index:      usize,
    state:      PlaybackState,
    last_gait:  Option<Gait>,
}

impl Ghost {
    /// Spawn an agent at the start of `track` and wrap it in a ghost.
    ///
    /// The embodiment kind follows the track's activity; `variant` picks the
    /// model within that kind and `alpha` its transparency.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::TrackTooShort`] if the track has fewer than two
    /// points, or [`PlaybackError::World`] if the world cannot provide the
    /// requested model.
    pub fn spawn<W: World + ?Sized>(
        track:   Track,
        variant: u32,
        alpha:   u8,
        world:   &mut W,
    ) -> PlaybackResult<Self> {
        if !track.is_usable() {
            return Err(PlaybackError::TrackTooShort { points: track.len() });
        }

        let embodiment = track.activity().embodiment();
        let start = track.points()[0].position();
        let heading = track.heading_at(0).unwrap_or_default();
        let agent = world.spawn(Embodiment::new(embodiment, variant).with_alpha(alpha), start, heading)?;

        debug!(%agent, %embodiment, alpha, points = track.len(), "ghost spawned");
        Ok(Self {
            track,
            agent,
            embodiment,
            policy: DeviationPolicy::for_embodiment(embodiment),
            index: 0,
            state: PlaybackState::Advancing,
            last_gait: None,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    #[inline]
    pub fn agent(&self) -> AgentHandle {
        self.agent
    }

    #[inline]
    pub fn embodiment(&self) -> EmbodimentKind {
        self.embodiment
    }

    #[inline]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Gait most recently started on a pedestrian agent.
    #[inline]
    pub fn last_gait(&self) -> Option<Gait> {
        self.last_gait
    }

    // ── Playback ──────────────────────────────────────────────────────────

    /// Advance playback by one logical tick.
    pub fn tick<W: World + ?Sized>(&mut self, world: &mut W) -> TickOutcome {
        if self.index + 1 < self.track.len() {
            let target = self.track.points()[self.index];
            let distance = world.position(self.agent).distance_to(target.position());
            let correction = self.policy.classify(distance);

            let mut speed = target.speed;
            match correction {
                Correction::Snap => {
                    world.teleport(self.agent, target.position());
                    if let Some(heading) = self.track.heading_at(self.index) {
                        world.set_heading(self.agent, heading);
                    }
                }
                Correction::CatchUp => speed *= self.policy.catch_up_factor,
                Correction::None => {}
            }

            self.index += 1;
            self.command_move(world, self.index, speed);

            trace!(agent = %self.agent, index = self.index, speed, ?correction, "ghost advanced");
            TickOutcome::Advanced { index: self.index, speed, correction }
        } else if self.state != PlaybackState::Finished {
            world.clear_tasks(self.agent);
            self.state = PlaybackState::Finished;
            world.set_finished(self.agent, true);

            debug!(agent = %self.agent, "ghost finished");
            TickOutcome::Completed
        } else {
            TickOutcome::Idle
        }
    }

    /// Re-anchor playback at the track point nearest `query`.
    ///
    /// Returns the index of that point.  If it has a successor the agent is
    /// teleported onto it and sent toward the successor, and the next tick
    /// continues from there.  If it is the last point the next tick
    /// finishes the ghost.
    pub fn regroup<W: World + ?Sized>(&mut self, world: &mut W, query: LocalPoint) -> usize {
        let nearest = self.track.nearest_index(query).unwrap_or(0);

        if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Advancing;
            world.set_finished(self.agent, false);
        }

        if nearest + 1 < self.track.len() {
            let from = self.track.points()[nearest];
            world.teleport(self.agent, from.position());
            if let Some(heading) = self.track.heading_at(nearest) {
                world.set_heading(self.agent, heading);
            }
            self.command_move(world, nearest + 1, from.speed);
            self.index = nearest + 1;
        } else {
            self.index = nearest;
        }

        debug!(agent = %self.agent, nearest, index = self.index, "ghost regrouped");
        nearest
    }

    /// Remove the ghost's agent from the world.
    pub fn despawn<W: World + ?Sized>(self, world: &mut W) {
        world.remove(self.agent);
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Send the agent toward point `target_index` at `speed`, in the style
    /// of its embodiment.
    fn command_move<W: World + ?Sized>(&mut self, world: &mut W, target_index: usize, speed: f32) {
        let target = self.track.points()[target_index].position();
        match self.embodiment {
            EmbodimentKind::Vehicle => {
                world.clear_tasks(self.agent);
                world.move_to(self.agent, target, speed);
                world.set_speed(self.agent, speed);
            }
            EmbodimentKind::Pedestrian => {
                world.move_to(self.agent, target, speed);
                self.apply_gait(world, speed);
                world.set_speed(self.agent, speed);
            }
        }
    }

    /// Start the gait for `speed` if it changed (or the agent is standing
    /// still), then set its playback rate.
    fn apply_gait<W: World + ?Sized>(&mut self, world: &mut W, speed: f32) {
        let selection = GaitSelection::for_speed(speed);

        if self.last_gait != Some(selection.gait) || world.speed(self.agent) == 0.0 {
            if let Some(previous) = self.last_gait {
                world.stop_animation(self.agent, previous);
            }
            world.play_animation(self.agent, selection.gait, selection.rate);
            self.last_gait = Some(selection.gait);
        }
        world.set_animation_rate(self.agent, selection.gait, selection.rate);
    }
}
