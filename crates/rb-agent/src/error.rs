use rb_core::{Coord, RobotId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("robot {0} does not exist")]
    UnknownRobot(RobotId),

    #[error("robot {0} has no pending step")]
    NoPendingStep(RobotId),

    #[error("robot {robot} cannot step from {from} to {to}")]
    NotAdjacent { robot: RobotId, from: Coord, to: Coord },
}

pub type RobotResult<T> = Result<T, RobotError>;
