//! `rb-core`: foundational types for the robot courier simulator.
//!
//! Every other `rb-*` crate depends on this one.  It has no `rb-*`
//! dependencies and only `rand` and `thiserror` externally, plus optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`coord`]   | `Coord` - integer (column, row) grid address           |
//! | [`ids`]     | `RobotId`                                              |
//! | [`time`]    | `Tick`, `Elapsed`, `SimClock`, `SimConfig`             |
//! | [`event`]   | `SimEvent` - robot arrival / parking notifications     |
//! | [`rng`]     | `SimRng` - seeded RNG for layout generation            |
//! | [`error`]   | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod coord;
pub mod error;
pub mod event;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::Coord;
pub use error::{CoreError, CoreResult};
pub use event::SimEvent;
pub use ids::RobotId;
pub use rng::SimRng;
pub use time::{Elapsed, SimClock, SimConfig, Tick};
