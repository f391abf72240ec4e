//! `ag-core`: foundational types for the `activity_ghosts` workspace.
//!
//! This crate is a dependency of every other `ag-*` crate.  It has no `ag-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`ids`]          | `GhostId`, `AgentHandle`                                 |
//! | [`geo`]          | `GeoCoord` (degrees), `LocalPoint` (planar metres)       |
//! | [`projection`]   | `project`, `Projector`: geodesic → local planar           |
//! | [`time`]         | `Tick`, `PlaybackClock`, `elapsed_label`                 |
//! | [`rng`]          | `SessionRng`                                             |
//! | [`activity`]     | `ActivityKind`, `EmbodimentKind`                         |
//! | [`config`]       | `GhostConfig` (TOML)                                     |
//! | [`error`]        | `GhostError`, `GhostResult`                              |

pub mod activity;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod projection;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use activity::{ActivityKind, EmbodimentKind};
pub use config::GhostConfig;
pub use error::{GhostError, GhostResult};
pub use geo::{GeoCoord, LocalPoint};
pub use ids::{AgentHandle, GhostId};
pub use projection::{Projector, project};
pub use rng::SessionRng;
pub use time::{PlaybackClock, Tick, elapsed_label, label_for_secs};
