use rb_agent::RobotError;
use rb_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    /// Grid or planner failure.  `TaskClaimFailed` and `OutOfBounds` end up
    /// here; `NoPath` never does, the controller turns it into a stall.
    #[error("spatial error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("robot error: {0}")]
    Robot(#[from] RobotError),
}

pub type ControlResult<T> = Result<T, ControlError>;
