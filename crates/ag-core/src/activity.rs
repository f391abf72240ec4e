//! Activity classification and the embodiment it implies.

/// What kind of activity a track records.
///
/// Anything that is not cycling is played back on foot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum ActivityKind {
    #[default]
    Cycling,
    Other,
}

/// Fitness-file sport code for cycling.
const SPORT_CYCLING: u8 = 2;

impl ActivityKind {
    /// Map a fitness-file sport code.  An absent code means cycling.
    pub fn from_sport_code(code: Option<u8>) -> Self {
        match code {
            None | Some(SPORT_CYCLING) => ActivityKind::Cycling,
            Some(_) => ActivityKind::Other,
        }
    }

    #[inline]
    pub fn embodiment(self) -> EmbodimentKind {
        match self {
            ActivityKind::Cycling => EmbodimentKind::Vehicle,
            ActivityKind::Other   => EmbodimentKind::Pedestrian,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Cycling => "cycling",
            ActivityKind::Other   => "other",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a ghost is embodied in the world: a rider on a vehicle, or a
/// pedestrian.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EmbodimentKind {
    Vehicle,
    Pedestrian,
}

impl EmbodimentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EmbodimentKind::Vehicle    => "vehicle",
            EmbodimentKind::Pedestrian => "pedestrian",
        }
    }
}

impl std::fmt::Display for EmbodimentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
