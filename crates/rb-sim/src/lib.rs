//! `rb-sim`: tick loop and run session for the robot courier simulator.
//!
//! # Tick loop
//!
//! ```text
//! while running and tick < config.max_ticks:
//!   ① Arrivals - finished steps pop the robot's path and move it; a robot
//!                whose path ran out runs its end-of-path transition and
//!                may raise an event.
//!   ② Planning - robots in id order:
//!                  idle            → define_path_of (zero-step plans finish
//!                                    on the spot)
//!                  steps pending   → prevent_collision_of, then begin the
//!                                    next step (or a wait)
//!   ③ Events   - the queue is drained once, in raise order: package cells
//!                are emptied, deliveries recorded, park times taken, and on
//!                a park the termination predicate is checked.
//!   ④ Clock    - advances unless the run just finished.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`sim`]      | `Sim<P>` - state, tick loop, session control, queries     |
//! | [`builder`]  | `SimBuilder` - validation and construction                |
//! | [`session`]  | `RunState` - idle / running / paused / finished           |
//! | [`view`]     | `RobotView` - read-only per-robot feed for presentation   |
//! | [`observer`] | `SimObserver` hooks, `NoopObserver`                       |
//! | [`error`]    | `SimError`, `SimResult<T>`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Candidate destinations searched on Rayon's pool.       |
//! | `fx-hash`  | FxHash obstacle sets.                                  |
//! | `serde`    | Serde derives on all public data types.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rb_core::SimConfig;
//! use rb_sim::{NoopObserver, SimBuilder};
//! use rb_spatial::{parse_layout, AStarPlanner};
//!
//! let grid = parse_layout("S..\n...\nE.P\n")?;
//! let planner = AStarPlanner::for_grid(&grid);
//! let mut sim = SimBuilder::new(SimConfig::default(), grid, planner).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("finished in {}", sim.elapsed());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod session;
pub mod sim;
pub mod view;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use session::RunState;
pub use sim::Sim;
pub use view::RobotView;
