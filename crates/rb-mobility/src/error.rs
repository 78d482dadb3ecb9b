use rb_core::{Coord, RobotId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("robot {0} is already mid-step")]
    AlreadyInTransit(RobotId),

    #[error("robot {0} has no movement slot")]
    UnknownRobot(RobotId),

    #[error("robot {robot} cannot step from {from} to {to}")]
    NotAdjacent { robot: RobotId, from: Coord, to: Coord },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
