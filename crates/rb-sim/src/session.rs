//! The run session: where a simulation is in its lifecycle.

use std::fmt;

/// Lifecycle of one run.
///
/// ```text
///          start            stop
///   Idle ─────────▶ Running ─────▶ Paused
///    ▲                 │  ◀─────────┘
///    │                 │    resume
///    │   reset         ▼ all delivered, all parked
///    └──────────── Finished
/// ```
///
/// `reset` returns to `Idle` from any state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl RunState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    #[inline]
    pub fn is_finished(self) -> bool {
        self == RunState::Finished
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Idle     => "idle",
            RunState::Running  => "running",
            RunState::Paused   => "paused",
            RunState::Finished => "finished",
        })
    }
}
