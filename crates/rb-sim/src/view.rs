//! Read-only per-robot data for whatever draws the simulation.

use rb_agent::TaskState;
use rb_core::{Coord, RobotId};

/// One robot as seen by a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotView {
    pub id:         RobotId,
    pub coord:      Coord,
    pub home:       Coord,
    pub task_state: TaskState,
    pub target:     Option<Coord>,

    /// Pending cells, next step first.
    pub plan: Vec<Coord>,

    /// `(from, to, progress)` while a step is under way.
    pub step: Option<(Coord, Coord, f32)>,
}
