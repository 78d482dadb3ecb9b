//! High-level mobility engine: starts single-cell steps and completes them.

use rb_core::{Coord, RobotId, Tick};

use crate::{MobilityError, MobilityResult, MobilityStore, MovementState};

/// Drives every robot's current step.
///
/// Every step, including a wait, lasts `ticks_per_step` ticks (at least 1),
/// so robots started on the same tick stay in lockstep.
pub struct MobilityEngine {
    pub ticks_per_step: u32,
    pub store:          MobilityStore,
}

impl MobilityEngine {
    pub fn new(ticks_per_step: u32, positions: impl IntoIterator<Item = Coord>) -> Self {
        Self {
            ticks_per_step,
            store: MobilityStore::new(positions),
        }
    }

    /// Start `robot` moving into `to`, which must be its current cell (a
    /// wait) or an orthogonal neighbour.  Returns the arrival tick.
    pub fn begin_step(&mut self, robot: RobotId, to: Coord, now: Tick) -> MobilityResult<Tick> {
        let ticks = u64::from(self.ticks_per_step.max(1));
        let state = self
            .store
            .states
            .get_mut(robot.index())
            .ok_or(MobilityError::UnknownRobot(robot))?;
        if state.in_transit {
            return Err(MobilityError::AlreadyInTransit(robot));
        }
        let from = state.from;
        if to != from && !to.is_adjacent(from) {
            return Err(MobilityError::NotAdjacent { robot, from, to });
        }

        let arrival_tick = now + ticks;
        *state = MovementState {
            in_transit:     true,
            from,
            to,
            departure_tick: now,
            arrival_tick,
        };
        Ok(arrival_tick)
    }

    /// Complete every step with `arrival_tick <= now`.
    ///
    /// Returns `(robot, cell)` pairs in ascending robot id order.
    pub fn tick_arrivals(&mut self, now: Tick) -> Vec<(RobotId, Coord)> {
        let arriving: Vec<RobotId> = self.store.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.in_transit && s.arrival_tick <= now)
            .map(|(i, _)| RobotId(i as u32))
            .collect();

        arriving
            .into_iter()
            .map(|robot| (robot, self.store.arrive(robot, now)))
            .collect()
    }

    /// `(from, to, progress)` for drawing `robot` between cells at `now`.
    pub fn visual_position(&self, robot: RobotId, now: Tick) -> Option<(Coord, Coord, f32)> {
        self.store.get(robot).map(|s| (s.from, s.to, s.progress(now)))
    }

    /// Put every robot back on `positions`, stationary at tick 0.
    pub fn reset(&mut self, positions: impl IntoIterator<Item = Coord>) {
        self.store = MobilityStore::new(positions);
    }
}
