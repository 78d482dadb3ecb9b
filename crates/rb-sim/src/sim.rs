//! The `Sim` struct and its tick loop.

use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;

use rb_agent::{RobotStore, RobotStoreBuilder};
use rb_control::{Assignment, Resolution, RobotController};
use rb_core::{Coord, Elapsed, RobotId, SimClock, SimConfig, SimEvent, Tick};
use rb_mobility::MobilityEngine;
use rb_spatial::{Cell, Grid, PathPlanner};
use tracing::{debug, info, warn};

use crate::{RobotView, RunState, SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation driver.
///
/// Owns the grid, the robots and their movement; lends them to the
/// coordinator on every call.  See the crate docs for the tick order.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathPlanner> {
    pub config: SimConfig,
    pub clock:  SimClock,
    pub state:  RunState,

    pub grid:       Grid,
    pub robots:     RobotStore,
    pub mobility:   MobilityEngine,
    pub controller: RobotController<P>,

    /// Raised during a tick, drained once at its end.  Pickups and drops
    /// carry the package cell as it was when the event was raised.
    pub events: VecDeque<(SimEvent, Option<Coord>)>,

    /// Packages dropped at a delivery point.
    pub delivered: BTreeSet<Coord>,

    /// Elapsed time at each robot's most recent park.
    pub park_times: Vec<Option<Elapsed>>,
}

impl<P: PathPlanner> Sim<P> {
    // ── Session control ───────────────────────────────────────────────────

    /// Begin (or restart after a reset) a run.
    ///
    /// Creates one robot per start point if there are none.
    pub fn start(&mut self) -> SimResult<()> {
        match self.state {
            RunState::Idle => {}
            RunState::Paused => return self.resume(),
            RunState::Running => return Ok(()),
            RunState::Finished => {
                return Err(SimError::InvalidState { action: "start", state: self.state });
            }
        }
        if self.robots.is_empty() {
            self.robots = RobotStoreBuilder::new()
                .with_homes(self.grid.starts().iter().copied())
                .build();
            self.park_times = vec![None; self.robots.count];
        }
        self.mobility.ticks_per_step = self.config.ticks_per_step;
        self.mobility.reset(self.robots.coord.iter().copied());
        self.state = RunState::Running;
        info!(
            robots = self.robots.count,
            packages = self.grid.packages().len(),
            tick = %self.clock.current_tick,
            "run started"
        );
        Ok(())
    }

    /// Pause.  Plans, steps in flight and the clock are kept as they are.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            info!(tick = %self.clock.current_tick, "run paused");
        }
    }

    pub fn resume(&mut self) -> SimResult<()> {
        match self.state {
            RunState::Paused => {
                self.state = RunState::Running;
                info!(tick = %self.clock.current_tick, "run resumed");
                Ok(())
            }
            RunState::Running => Ok(()),
            state => Err(SimError::InvalidState { action: "resume", state }),
        }
    }

    /// Back to a freshly authored grid: every package restored and
    /// available, all robots, plans, events, deliveries and times dropped,
    /// the clock at zero.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.robots.clear();
        self.mobility.reset(std::iter::empty());
        self.events.clear();
        self.delivered.clear();
        self.park_times.clear();
        self.clock.reset();
        self.state = RunState::Idle;
        info!("run reset");
    }

    /// Rescale wall-clock pacing.  Simulated time is unaffected.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) -> SimResult<()> {
        let mut config = self.config.clone();
        config.speed_multiplier = multiplier;
        config.validate()?;
        self.config = config;
        debug!(multiplier, "speed changed");
        Ok(())
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Start if idle, then tick until finished, paused, or
    /// `config.max_ticks` is reached.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.state == RunState::Idle {
            self.start()?;
        }
        while self.state.is_running() && self.clock.current_tick.0 < self.config.max_ticks {
            self.tick(observer)?;
        }
        if self.state.is_running() {
            warn!(
                max_ticks = self.config.max_ticks,
                delivered = self.delivered.len(),
                packages = self.grid.packages().len(),
                "tick horizon reached before the run finished"
            );
        }
        observer.on_sim_end(self.clock.current_tick, self.elapsed());
        Ok(())
    }

    /// Up to `n` ticks; stops early if the run finishes or is paused.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if !self.state.is_running() {
                break;
            }
            self.tick(observer)?;
        }
        Ok(())
    }

    /// One tick.  A no-op unless the run is `Running`.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if !self.state.is_running() {
            return Ok(());
        }
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.process_arrivals(now)?;
        self.plan_and_move(now)?;
        self.drain_events(now, observer)?;

        let moving = self.mobility.store.states.iter().filter(|s| s.in_transit).count();
        observer.on_tick_end(now, moving);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && (now.0 % interval == 0 || self.state.is_finished()) {
            observer.on_snapshot(now, &self.robots, &self.mobility.store);
        }

        if !self.state.is_finished() {
            self.clock.advance();
        }
        Ok(())
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn process_arrivals(&mut self, now: Tick) -> SimResult<()> {
        for (robot, _cell) in self.mobility.tick_arrivals(now) {
            self.robots.complete_step(robot)?;
            if self.robots.is_idle(robot) {
                self.finish_movement(robot);
            }
        }
        Ok(())
    }

    fn plan_and_move(&mut self, now: Tick) -> SimResult<()> {
        for i in 0..self.robots.count {
            let robot = RobotId(i as u32);
            if self.mobility.store.in_transit(robot) {
                continue;
            }

            if self.robots.is_idle(robot) {
                if self.robots.parked[i] && self.grid.available_packages().is_empty() {
                    continue;
                }
                let assignment =
                    self.controller.define_path_of(robot, &mut self.robots, &mut self.grid)?;
                if assignment == Assignment::Stalled {
                    continue;
                }
                if self.robots.is_idle(robot) {
                    // Already standing on the target.
                    self.finish_movement(robot);
                    continue;
                }
            }

            let resolution = self.controller.prevent_collision_of(
                robot,
                &mut self.robots,
                &self.mobility.store,
                &mut self.grid,
            )?;
            if let Resolution::Abandoned { .. } = resolution {
                continue;
            }
            if let Some(next) = self.robots.next_step(robot) {
                self.mobility.begin_step(robot, next, now)?;
            }
        }
        Ok(())
    }

    fn finish_movement(&mut self, robot: RobotId) {
        let packages_left = !self.grid.available_packages().is_empty();
        if let Some(event) = self.robots.finish_movement(robot, self.grid.ends(), packages_left) {
            let i = robot.index();
            let package = match event {
                SimEvent::ArrivedAtPackage(_) => self.robots.cargo[i],
                SimEvent::ArrivedAtDelivery(_) => self.robots.delivered[i],
                SimEvent::Parked(_) => None,
            };
            self.events.push_back((event, package));
        }
    }

    fn drain_events<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        while let Some((event, package)) = self.events.pop_front() {
            debug!(tick = %now, %event, "event");
            self.handle_event(event, package)?;
            observer.on_event(now, event);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: SimEvent, package: Option<Coord>) -> SimResult<()> {
        let i = event.robot().index();
        match event {
            SimEvent::ArrivedAtPackage(_) => {
                if let Some(package) = package {
                    self.grid.set_state(package, Cell::Empty)?;
                }
            }
            SimEvent::ArrivedAtDelivery(_) => {
                if let Some(package) = package {
                    self.delivered.insert(package);
                }
            }
            SimEvent::Parked(robot) => {
                self.park_times[i] = Some(self.elapsed());
                if self.all_packages_were_delivered() && self.all_robots_are_parked() {
                    self.state = RunState::Finished;
                    info!(
                        %robot,
                        tick = %self.clock.current_tick,
                        elapsed = %self.elapsed(),
                        "all packages delivered and all robots parked"
                    );
                }
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every declared package has been dropped at a delivery point.
    pub fn all_packages_were_delivered(&self) -> bool {
        self.delivered.len() == self.grid.packages().len()
    }

    /// Every robot stands on its home cell.
    pub fn all_robots_are_parked(&self) -> bool {
        self.robots.robot_ids().all(|r| self.robots.is_home(r))
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Simulated time since the run started.
    pub fn elapsed(&self) -> Elapsed {
        self.clock.elapsed()
    }

    /// Wall-clock time a real-time driver should wait between ticks.
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }

    pub fn park_time(&self, robot: RobotId) -> Option<Elapsed> {
        self.park_times.get(robot.index()).copied().flatten()
    }

    /// Per-robot state for drawing, in id order.
    pub fn robot_views(&self) -> Vec<RobotView> {
        let now = self.clock.current_tick;
        self.robots
            .robot_ids()
            .map(|robot| {
                let i = robot.index();
                let step = self
                    .mobility
                    .store
                    .in_transit(robot)
                    .then(|| self.mobility.visual_position(robot, now))
                    .flatten();
                RobotView {
                    id:         robot,
                    coord:      self.robots.coord[i],
                    home:       self.robots.home[i],
                    task_state: self.robots.task_state[i],
                    target:     self.robots.target[i],
                    plan:       self.robots.pending(robot).collect(),
                    step,
                }
            })
            .collect()
    }
}
