use ag_core::EmbodimentKind;
use thiserror::Error;

/// Failures reported by a [`World`][crate::World] implementation.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("no {kind} asset for variant {variant}")]
    MissingAsset {
        kind:    EmbodimentKind,
        variant: u32,
    },
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("track has {points} point(s); at least 2 are needed for playback")]
    TrackTooShort { points: usize },

    #[error("world error: {0}")]
    World(#[from] WorldError),
}

pub type PlaybackResult<T> = Result<T, PlaybackError>;
