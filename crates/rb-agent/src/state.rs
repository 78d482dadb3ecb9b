//! Per-robot task state.

use std::fmt;

/// What a robot is doing with respect to packages.
///
/// ```text
///   EMPTY ──(reaches claimed package)──▶ FULL
///     ▲                                    │
///     └──────(reaches a delivery point)────┘
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskState {
    /// Not carrying anything.  Seeks a package, or home when none are left.
    #[default]
    Empty,
    /// Carrying a package.  Seeks the nearest delivery point.
    Full,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Empty => "empty",
            TaskState::Full  => "full",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
