//! Fluent builder for `RobotStore`.
//!
//! # Usage
//!
//! ```rust
//! use rb_agent::RobotStoreBuilder;
//! use rb_core::Coord;
//!
//! let starts = [Coord::new(0, 0), Coord::new(4, 0)];
//! let store = RobotStoreBuilder::new()
//!     .with_homes(starts.iter().copied())
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(store.home[1], Coord::new(4, 0));
//! ```

use rb_core::Coord;

use crate::RobotStore;

/// Collects home cells, then allocates every SoA array in one go.
///
/// Robots are numbered in the order homes are added, which must be the
/// declaration order of the grid's start points.
#[derive(Default)]
pub struct RobotStoreBuilder {
    homes: Vec<Coord>,
}

impl RobotStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One robot at `home`.
    pub fn with_robot(mut self, home: Coord) -> Self {
        self.homes.push(home);
        self
    }

    /// One robot per cell, in iteration order.
    pub fn with_homes(mut self, homes: impl IntoIterator<Item = Coord>) -> Self {
        self.homes.extend(homes);
        self
    }

    pub fn build(self) -> RobotStore {
        let mut store = RobotStore {
            count:      0,
            coord:      Vec::with_capacity(self.homes.len()),
            home:       Vec::with_capacity(self.homes.len()),
            task_state: Vec::with_capacity(self.homes.len()),
            path:       Vec::with_capacity(self.homes.len()),
            target:     Vec::with_capacity(self.homes.len()),
            cargo:      Vec::with_capacity(self.homes.len()),
            delivered:  Vec::with_capacity(self.homes.len()),
            parked:     Vec::with_capacity(self.homes.len()),
            stalled:    Vec::with_capacity(self.homes.len()),
            trail:      Vec::with_capacity(self.homes.len()),
        };
        for home in self.homes {
            store.push_robot(home);
        }
        store
    }
}
