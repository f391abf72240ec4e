//! An in-memory [`World`] for tests and headless replays.
//!
//! Agents move in straight lines toward their last `move_to` target at
//! their current speed whenever [`HeadlessWorld::step`] is called.  Every
//! call a ghost makes is appended to a command log so callers can check
//! exactly what playback asked for.

use std::collections::HashMap;

use ag_core::{AgentHandle, EmbodimentKind, LocalPoint};

use crate::{Embodiment, Gait, World, WorldError};

/// Model variants per kind in a default world.
const DEFAULT_VARIANTS: u32 = 4;

// ── Command log ───────────────────────────────────────────────────────────────

/// One call made against a [`HeadlessWorld`].
#[derive(Clone, PartialEq, Debug)]
pub enum WorldCommand {
    Spawn { agent: AgentHandle, embodiment: Embodiment, at: LocalPoint, heading: f32 },
    Teleport { agent: AgentHandle, to: LocalPoint },
    SetHeading { agent: AgentHandle, heading: f32 },
    MoveTo { agent: AgentHandle, target: LocalPoint, speed: f32 },
    SetSpeed { agent: AgentHandle, speed: f32 },
    PlayAnimation { agent: AgentHandle, gait: Gait, rate: f32 },
    StopAnimation { agent: AgentHandle, gait: Gait },
    SetAnimationRate { agent: AgentHandle, gait: Gait, rate: f32 },
    ClearTasks { agent: AgentHandle },
    SetFinished { agent: AgentHandle, finished: bool },
    Remove { agent: AgentHandle },
}

impl WorldCommand {
    /// Agent the command targets.
    pub fn agent(&self) -> AgentHandle {
        match *self {
            WorldCommand::Spawn { agent, .. }
            | WorldCommand::Teleport { agent, .. }
            | WorldCommand::SetHeading { agent, .. }
            | WorldCommand::MoveTo { agent, .. }
            | WorldCommand::SetSpeed { agent, .. }
            | WorldCommand::PlayAnimation { agent, .. }
            | WorldCommand::StopAnimation { agent, .. }
            | WorldCommand::SetAnimationRate { agent, .. }
            | WorldCommand::ClearTasks { agent }
            | WorldCommand::SetFinished { agent, .. }
            | WorldCommand::Remove { agent } => agent,
        }
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// State of one agent in a [`HeadlessWorld`].
#[derive(Clone, PartialEq, Debug)]
pub struct HeadlessAgent {
    pub embodiment: Embodiment,
    pub position:   LocalPoint,
    pub heading:    f32,
    pub speed:      f32,
    /// Destination of the pending movement order, if any.
    pub target:     Option<LocalPoint>,
    /// Running gait animation and its rate.
    pub animation:  Option<(Gait, f32)>,
    pub finished:   bool,
}

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct HeadlessWorld {
    /// Indexed by `AgentHandle`; `None` once removed.
    agents:   Vec<Option<HeadlessAgent>>,
    variants: HashMap<EmbodimentKind, u32>,
    log:      Vec<WorldCommand>,
}

impl Default for HeadlessWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessWorld {
    /// A world with every embodiment kind available.
    pub fn new() -> Self {
        let variants = [EmbodimentKind::Vehicle, EmbodimentKind::Pedestrian]
            .into_iter()
            .map(|kind| (kind, DEFAULT_VARIANTS))
            .collect();
        Self { agents: Vec::new(), variants, log: Vec::new() }
    }

    /// Set the number of model variants available for `kind`.
    pub fn with_variants(mut self, kind: EmbodimentKind, count: u32) -> Self {
        self.variants.insert(kind, count);
        self
    }

    /// Make every spawn of `kind` fail with [`WorldError::MissingAsset`].
    pub fn with_unavailable(self, kind: EmbodimentKind) -> Self {
        self.with_variants(kind, 0)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn agent(&self, handle: AgentHandle) -> Option<&HeadlessAgent> {
        self.agents.get(handle.index()).and_then(Option::as_ref)
    }

    /// Live agents with their handles.
    pub fn agents(&self) -> impl Iterator<Item = (AgentHandle, &HeadlessAgent)> {
        self.agents.iter().enumerate().filter_map(|(i, a)| {
            let agent = a.as_ref()?;
            Some((AgentHandle(i as u32), agent))
        })
    }

    pub fn agent_count(&self) -> usize {
        self.agents.iter().flatten().count()
    }

    /// Every command received so far, oldest first.
    pub fn log(&self) -> &[WorldCommand] {
        &self.log
    }

    /// Drain the command log.
    pub fn take_log(&mut self) -> Vec<WorldCommand> {
        std::mem::take(&mut self.log)
    }

    // ── Simulation ────────────────────────────────────────────────────────

    /// Move an agent without logging a command, the way physics or another
    /// actor would push it off its track.
    pub fn place(&mut self, handle: AgentHandle, at: LocalPoint) {
        if let Some(agent) = self.agent_mut(handle) {
            agent.position = at;
        }
    }

    /// Advance every agent toward its target by `speed * dt_secs` metres.
    /// An agent that reaches its target stops there, keeping its speed.
    pub fn step(&mut self, dt_secs: f64) {
        for agent in self.agents.iter_mut().flatten() {
            let Some(target) = agent.target else { continue };
            let remaining = agent.position.distance_to(target);
            let travel = f64::from(agent.speed.max(0.0)) * dt_secs;

            if travel >= remaining {
                agent.position = target;
                agent.target = None;
            } else {
                let t = travel / remaining;
                agent.position = LocalPoint::new(
                    agent.position.x + (target.x - agent.position.x) * t,
                    agent.position.y + (target.y - agent.position.y) * t,
                );
            }
        }
    }

    fn agent_mut(&mut self, handle: AgentHandle) -> Option<&mut HeadlessAgent> {
        self.agents.get_mut(handle.index()).and_then(Option::as_mut)
    }
}

impl World for HeadlessWorld {
    fn variant_count(&self, kind: EmbodimentKind) -> u32 {
        self.variants.get(&kind).copied().unwrap_or(0)
    }

    fn spawn(
        &mut self,
        embodiment: Embodiment,
        at:         LocalPoint,
        heading:    f32,
    ) -> Result<AgentHandle, WorldError> {
        if embodiment.variant >= self.variant_count(embodiment.kind) {
            return Err(WorldError::MissingAsset {
                kind:    embodiment.kind,
                variant: embodiment.variant,
            });
        }

        let agent = AgentHandle(self.agents.len() as u32);
        self.agents.push(Some(HeadlessAgent {
            embodiment,
            position: at,
            heading,
            speed: 0.0,
            target: None,
            animation: None,
            finished: false,
        }));
        self.log.push(WorldCommand::Spawn { agent, embodiment, at, heading });
        Ok(agent)
    }

    fn position(&self, agent: AgentHandle) -> LocalPoint {
        self.agent(agent).map_or(LocalPoint::ZERO, |a| a.position)
    }

    fn speed(&self, agent: AgentHandle) -> f32 {
        self.agent(agent).map_or(0.0, |a| a.speed)
    }

    fn teleport(&mut self, agent: AgentHandle, to: LocalPoint) {
        if let Some(a) = self.agent_mut(agent) {
            a.position = to;
        }
        self.log.push(WorldCommand::Teleport { agent, to });
    }

    fn set_heading(&mut self, agent: AgentHandle, heading: f32) {
        if let Some(a) = self.agent_mut(agent) {
            a.heading = heading;
        }
        self.log.push(WorldCommand::SetHeading { agent, heading });
    }

    fn move_to(&mut self, agent: AgentHandle, target: LocalPoint, speed: f32) {
        if let Some(a) = self.agent_mut(agent) {
            a.target = Some(target);
        }
        self.log.push(WorldCommand::MoveTo { agent, target, speed });
    }

    fn set_speed(&mut self, agent: AgentHandle, speed: f32) {
        if let Some(a) = self.agent_mut(agent) {
            a.speed = speed;
        }
        self.log.push(WorldCommand::SetSpeed { agent, speed });
    }

    fn play_animation(&mut self, agent: AgentHandle, gait: Gait, rate: f32) {
        if let Some(a) = self.agent_mut(agent) {
            a.animation = Some((gait, rate));
        }
        self.log.push(WorldCommand::PlayAnimation { agent, gait, rate });
    }

    fn stop_animation(&mut self, agent: AgentHandle, gait: Gait) {
        if let Some(a) = self.agent_mut(agent) {
            if a.animation.is_some_and(|(running, _)| running == gait) {
                a.animation = None;
            }
        }
        self.log.push(WorldCommand::StopAnimation { agent, gait });
    }

    fn set_animation_rate(&mut self, agent: AgentHandle, gait: Gait, rate: f32) {
        if let Some(a) = self.agent_mut(agent) {
            if let Some((running, r)) = a.animation.as_mut() {
                if *running == gait {
                    *r = rate;
                }
            }
        }
        self.log.push(WorldCommand::SetAnimationRate { agent, gait, rate });
    }

    /// Drops the pending order and brings the agent to a stop.
    fn clear_tasks(&mut self, agent: AgentHandle) {
        if let Some(a) = self.agent_mut(agent) {
            a.target = None;
            a.speed = 0.0;
        }
        self.log.push(WorldCommand::ClearTasks { agent });
    }

    fn set_finished(&mut self, agent: AgentHandle, finished: bool) {
        if let Some(a) = self.agent_mut(agent) {
            a.finished = finished;
        }
        self.log.push(WorldCommand::SetFinished { agent, finished });
    }

    fn remove(&mut self, agent: AgentHandle) {
        if let Some(slot) = self.agents.get_mut(agent.index()) {
            *slot = None;
        }
        self.log.push(WorldCommand::Remove { agent });
    }
}
