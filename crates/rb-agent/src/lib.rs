//! `rb-agent`: Structure-of-Arrays robot storage for the courier simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`state`]   | `TaskState` - EMPTY (seeking pickup) / FULL (seeking drop)   |
//! | [`store`]   | `RobotStore` (SoA arrays, path stacks, state machine)        |
//! | [`builder`] | `RobotStoreBuilder` (one robot per start point)              |
//! | [`error`]   | `RobotError`, `RobotResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.          |

pub mod builder;
pub mod error;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::RobotStoreBuilder;
pub use error::{RobotError, RobotResult};
pub use state::TaskState;
pub use store::RobotStore;
