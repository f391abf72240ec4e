//! Pedestrian gait banding.
//!
//! A pedestrian ghost's animation is chosen from its commanded speed, and
//! the animation's playback rate is scaled so the feet keep pace with the
//! ground:
//!
//! | speed (m/s)   | gait   | rate       |
//! |---------------|--------|------------|
//! | v < 2.4       | walk   | v / 1.69   |
//! | 2.4 ≤ v < 4.6 | jog    | v / 3.13   |
//! | v ≥ 4.6       | sprint | v / 6.63   |

/// Lower speed bound of the jog band, m/s.
const JOG_FROM: f32 = 2.4;
/// Lower speed bound of the sprint band, m/s.
const SPRINT_FROM: f32 = 4.6;

/// Locomotion animation category for pedestrian ghosts.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Gait {
    Walk,
    Jog,
    Sprint,
}

impl Gait {
    /// Band for speed `v`.
    pub fn for_speed(v: f32) -> Gait {
        if v < JOG_FROM {
            Gait::Walk
        } else if v < SPRINT_FROM {
            Gait::Jog
        } else {
            Gait::Sprint
        }
    }

    /// Ground speed at which this gait's animation plays at rate 1.0.
    pub fn natural_speed(self) -> f32 {
        match self {
            Gait::Walk   => 1.69,
            Gait::Jog    => 3.13,
            Gait::Sprint => 6.63,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gait::Walk   => "walk",
            Gait::Jog    => "jog",
            Gait::Sprint => "sprint",
        }
    }
}

impl std::fmt::Display for Gait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gait together with its playback rate at a particular speed.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GaitSelection {
    pub gait: Gait,
    pub rate: f32,
}

impl GaitSelection {
    pub fn for_speed(v: f32) -> Self {
        let gait = Gait::for_speed(v);
        Self { gait, rate: v / gait.natural_speed() }
    }
}
