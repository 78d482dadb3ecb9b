//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, RobotSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors never reach the tick loop: [`SimOutputObserver`][crate::SimOutputObserver]
/// keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()>;

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
