//! Plain data row types written by output backends.

use rb_agent::{RobotStore, TaskState};
use rb_core::{SimEvent, Tick};
use rb_mobility::MovementState;

/// One robot's position and task state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotSnapshotRow {
    pub tick:       u64,
    pub robot:      u32,
    /// The cell the robot stands on (or is leaving, mid-step).
    pub col:        i32,
    pub row:        i32,
    pub task_state: TaskState,
    /// Mid-step, including a one-step wait in place.
    pub in_step:    bool,
    /// The cell being entered while `in_step`.
    pub next:       Option<(i32, i32)>,
}

impl RobotSnapshotRow {
    pub fn capture(tick: Tick, robots: &RobotStore, states: &[MovementState]) -> Vec<Self> {
        robots
            .robot_ids()
            .map(|r| {
                let i = r.index();
                let here = robots.coord[i];
                let step = states.get(i).filter(|s| s.in_transit);
                RobotSnapshotRow {
                    tick:       tick.0,
                    robot:      r.0,
                    col:        here.col,
                    row:        here.row,
                    task_state: robots.task_state[i],
                    in_step:    step.is_some(),
                    next:       step.map(|s| (s.to.col, s.to.row)),
                }
            })
            .collect()
    }
}

/// One event as the driver handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub tick:  u64,
    pub robot: u32,
    pub event: &'static str,
}

impl EventRow {
    pub fn new(tick: Tick, event: SimEvent) -> Self {
        Self { tick: tick.0, robot: event.robot().0, event: event.as_str() }
    }
}
