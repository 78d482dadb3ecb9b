//! Fluent builder for constructing a [`Sim`].

use std::collections::{BTreeSet, VecDeque};

use rb_agent::{RobotStore, RobotStoreBuilder};
use rb_control::RobotController;
use rb_core::SimConfig;
use rb_mobility::MobilityEngine;
use rb_spatial::{Grid, PathPlanner};

use crate::{RunState, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick length, step length, speed, horizon
/// - [`Grid`]: the authored layout
/// - `P: PathPlanner`: the grid search (e.g. [`rb_spatial::AStarPlanner`])
///
/// # Optional inputs
///
/// | Method         | Default                                   |
/// |----------------|-------------------------------------------|
/// | `.robots(s)`   | One robot per start point, in order       |
///
/// # Example
///
/// ```rust,ignore
/// let planner = AStarPlanner::for_grid(&grid);
/// let mut sim = SimBuilder::new(config, grid, planner).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PathPlanner> {
    config:  SimConfig,
    grid:    Grid,
    planner: P,
    robots:  Option<RobotStore>,
}

impl<P: PathPlanner> SimBuilder<P> {
    pub fn new(config: SimConfig, grid: Grid, planner: P) -> Self {
        Self { config, grid, planner, robots: None }
    }

    /// Supply robots instead of deriving them from the grid's start points.
    ///
    /// Every robot's home must lie on the grid.  The store is replaced by
    /// one derived from the start points after a [`Sim::reset`].
    pub fn robots(mut self, robots: RobotStore) -> Self {
        self.robots = Some(robots);
        self
    }

    /// Validate inputs and return an idle [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        let robots = match self.robots {
            Some(r) => {
                if let Some(bad) = r.home.iter().find(|&&h| !self.grid.contains(h)) {
                    return Err(SimError::Config(format!("robot home {bad} lies outside the grid")));
                }
                r
            }
            None => RobotStoreBuilder::new()
                .with_homes(self.grid.starts().iter().copied())
                .build(),
        };

        let mobility = MobilityEngine::new(self.config.ticks_per_step, robots.coord.iter().copied());
        let park_times = vec![None; robots.count];

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            state:      RunState::Idle,
            grid:       self.grid,
            robots,
            mobility,
            controller: RobotController::new(self.planner),
            events:     VecDeque::new(),
            delivered:  BTreeSet::new(),
            park_times,
        })
    }
}
