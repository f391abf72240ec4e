//! `ag-playback`: drive one world agent along one recorded track.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`world`]    | `World` trait: the host engine as seen by a ghost; `Embodiment` |
//! | [`gait`]     | `Gait`: walk / jog / sprint banding by speed                    |
//! | [`engine`]   | `Ghost`: per-track playback state machine, regroup              |
//! | [`headless`] | `HeadlessWorld`: in-memory `World` with a command log           |
//! | [`error`]    | `WorldError`, `PlaybackError`, `PlaybackResult<T>`              |
//!
//! # Playback model
//!
//! A ghost holds a cursor into its track.  Each logical tick it compares
//! the agent's actual position with the point under the cursor, corrects
//! drift (teleport when far off, 10 % faster when slightly behind), steps
//! the cursor, and orders the agent toward the next point.  When no point
//! remains it stops the agent and raises the world's completion marker
//! once.  [`Ghost::regroup`] moves the cursor to the point nearest any
//! position and resumes from there.

pub mod engine;
pub mod error;
pub mod gait;
pub mod headless;
pub mod world;

#[cfg(test)]
mod tests;

pub use engine::{Correction, DeviationPolicy, Ghost, PlaybackState, TickOutcome};
pub use error::{PlaybackError, PlaybackResult, WorldError};
pub use gait::{Gait, GaitSelection};
pub use headless::{HeadlessAgent, HeadlessWorld, WorldCommand};
pub use world::{Embodiment, OPAQUE, World};
