//! `rb-spatial`: the grid the robots live on and the planner that crosses it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Cell`, `Grid` - cell states plus start/end/package sets    |
//! | [`layout`]  | `parse_layout`, `load_layout_path` - text map authoring     |
//! | [`planner`] | `PathPlanner` trait, `ObstacleSet`, `Plan`, `AStarPlanner`  |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for obstacle sets.              |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod grid;
pub mod layout;
pub mod planner;


pub use error::{SpatialError, SpatialResult};
pub use grid::{Cell, Grid};
pub use layout::{load_layout_path, parse_layout};
pub use planner::{AStarPlanner, ObstacleSet, PathPlanner, Plan};
