use rb_agent::RobotError;
use rb_control::ControlError;
use rb_core::CoreError;
use rb_mobility::MobilityError;
use rb_spatial::SpatialError;
use thiserror::Error;

use crate::RunState;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state:  RunState,
    },

    #[error("grid error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("coordinator error: {0}")]
    Control(#[from] ControlError),

    #[error("robot error: {0}")]
    Robot(#[from] RobotError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),
}

pub type SimResult<T> = Result<T, SimError>;
