//! `rb-mobility`: robot movement state and arrival tracking.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`state`]   | `MovementState` - one robot's current step                  |
//! | [`store`]   | `MobilityStore` - `Vec<MovementState>` indexed by `RobotId` |
//! | [`engine`]  | `MobilityEngine` - begins steps, completes arrivals         |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                        |
//!
//! # Movement model (one cell per step)
//!
//! 1. `MobilityEngine::begin_step` starts a robot toward one neighbouring
//!    cell (or its own cell, for a wait) and sets
//!    `arrival_tick = now + ticks_per_step`.
//! 2. The robot logically stays at `from` until `arrival_tick`, but `to` is
//!    already reserved: collision checks treat both cells as occupied.
//! 3. `MobilityEngine::tick_arrivals(now)` returns every robot whose
//!    `arrival_tick <= now`, in id order, and marks it stationary at `to`.
//!    rb-sim then pops the robot's path and runs the end-of-path logic.
//!
//! `MobilityEngine::visual_position` returns `(from, to, progress)` for
//! smooth rendering between cells.

pub mod engine;
pub mod error;
pub mod state;
pub mod store;


pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
pub use state::MovementState;
pub use store::MobilityStore;
