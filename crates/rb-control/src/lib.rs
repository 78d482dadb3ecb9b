//! `rb-control`: the coordinator: who goes where, and who yields.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`controller`] | `RobotController<P>` - assignment, shortest-of-many search |
//! | [`outcome`]    | `Assignment`, `Resolution` - what a call decided           |
//! | [`error`]      | `ControlError`, `ControlResult<T>`                         |
//!
//! # Ownership
//!
//! The controller owns only its planner.  The grid, the robots and the
//! movement state belong to the simulation driver and are lent to each call,
//! so nothing here holds a reference across ticks.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Candidate destinations are searched with Rayon.          |

pub mod controller;
pub mod error;
pub mod outcome;


pub use controller::RobotController;
pub use error::{ControlError, ControlResult};
pub use outcome::{Assignment, Resolution};
