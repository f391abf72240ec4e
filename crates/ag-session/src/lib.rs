//! `ag-session`: load, play, regroup and clear a set of ghosts.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`catalog`]  | `ActivityCatalog`: file name → start position, CSV persistence  |
//! | [`library`]  | `ActivityLibrary`: directory scan, proximity decoding           |
//! | [`builder`]  | `SessionBuilder`: validated construction                       |
//! | [`session`]  | `GhostSession`: load, tick, regroup, clear, labels             |
//! | [`observer`] | `SessionObserver`, `NoopObserver`                              |
//! | [`error`]    | `SessionError`, `SessionResult<T>`                             |
//!
//! # Session loop
//!
//! ```text
//! library.refresh()                         catalogue new activity files
//! tracks = library.tracks_near(player, r)   decode the ones starting nearby
//! session.load(tracks, player, heading)     spawn one ghost per usable track
//! every frame:
//!   session.advance(frame_ms, observer)     one tick per tick_interval_ms
//! on demand:
//!   session.regroup_all(player)             re-anchor every ghost
//!   session.clear()                         remove every ghost
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ag_playback::HeadlessWorld;
//! use ag_session::{NoopObserver, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(config, HeadlessWorld::new()).build()?;
//! session.load(tracks, LocalPoint::ZERO, 0.0);
//! while session.active_count() > 0 {
//!     session.world.step(1.0);
//!     session.advance(1_000, &mut NoopObserver);
//! }
//! ```

pub mod builder;
pub mod catalog;
pub mod error;
pub mod library;
pub mod observer;
pub mod session;


pub use builder::SessionBuilder;
pub use catalog::ActivityCatalog;
pub use error::{SessionError, SessionResult};
pub use library::ActivityLibrary;
pub use observer::{NoopObserver, SessionObserver};
pub use session::{GhostLabel, GhostSession, stagger_offset};
