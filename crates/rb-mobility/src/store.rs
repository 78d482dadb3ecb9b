//! The `MobilityStore`: per-robot movement state.

use rb_core::{Coord, RobotId, Tick};

use crate::MovementState;

/// Movement state for every robot, indexed by `RobotId`.
#[derive(Clone, Debug, Default)]
pub struct MobilityStore {
    pub states: Vec<MovementState>,
}

impl MobilityStore {
    /// One stationary slot per cell in `positions`, at tick 0.
    pub fn new(positions: impl IntoIterator<Item = Coord>) -> Self {
        Self {
            states: positions
                .into_iter()
                .map(|c| MovementState::stationary(c, Tick::ZERO))
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn get(&self, robot: RobotId) -> Option<&MovementState> {
        self.states.get(robot.index())
    }

    /// Finish `robot`'s step: stationary at `to`.  Returns the arrival cell.
    pub fn arrive(&mut self, robot: RobotId, now: Tick) -> Coord {
        let dest = self.states[robot.index()].to;
        self.states[robot.index()] = MovementState::stationary(dest, now);
        dest
    }

    #[inline]
    pub fn in_transit(&self, robot: RobotId) -> bool {
        self.states[robot.index()].in_transit
    }

    /// First robot in id order that stands on or is entering `cell`,
    /// skipping `except`.
    pub fn occupant(&self, cell: Coord, except: RobotId) -> Option<RobotId> {
        self.states
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != except.index())
            .find(|(_, s)| s.occupies(cell))
            .map(|(i, _)| RobotId(i as u32))
    }
}
