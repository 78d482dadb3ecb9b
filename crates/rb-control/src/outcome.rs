//! Decisions returned by the controller, for logging, observers and tests.

use rb_core::{Coord, RobotId};

/// What [`define_path_of`][crate::RobotController::define_path_of] gave a
/// robot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Assignment {
    /// Claimed the package at `target`; `steps` moves away.
    Package { target: Coord, steps: usize },
    /// Heading to the nearest delivery point.
    Delivery { target: Coord, steps: usize },
    /// Nothing left to fetch; heading home.
    Home { target: Coord, steps: usize },
    /// No candidate was reachable.  The robot stays idle and is asked again
    /// next tick.
    Stalled,
}

impl Assignment {
    pub fn target(self) -> Option<Coord> {
        match self {
            Assignment::Package { target, .. }
            | Assignment::Delivery { target, .. }
            | Assignment::Home { target, .. } => Some(target),
            Assignment::Stalled => None,
        }
    }

    pub fn steps(self) -> usize {
        match self {
            Assignment::Package { steps, .. }
            | Assignment::Delivery { steps, .. }
            | Assignment::Home { steps, .. } => steps,
            Assignment::Stalled => 0,
        }
    }
}

/// What [`prevent_collision_of`][crate::RobotController::prevent_collision_of]
/// did about the robot's next step.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// Next cell is free; go ahead.
    Clear,
    /// `blocker` holds the next cell but is not heading here: wait a step.
    Wait { blocker: RobotId },
    /// `blocker` holds the next cell and wants this one: route around it.
    Detour { blocker: RobotId },
    /// No way around `blocker`.  The plan was dropped (and a claimed
    /// package released); the robot replans next tick.
    Abandoned { blocker: RobotId },
}
