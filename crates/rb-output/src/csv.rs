//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `robot_snapshots.csv`
//! - `events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, RobotSnapshotRow};

pub const SNAPSHOTS_FILE_NAME: &str = "robot_snapshots.csv";
pub const EVENTS_FILE_NAME: &str = "events.csv";

/// Writes run output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (truncating) the two CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(SNAPSHOTS_FILE_NAME))?;
        snapshots.write_record([
            "tick", "robot", "col", "row", "task_state", "in_step", "next_col", "next_row",
        ])?;

        let mut events = Writer::from_path(dir.join(EVENTS_FILE_NAME))?;
        events.write_record(["tick", "robot", "event"])?;

        Ok(Self { snapshots, events, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            // Stationary robots leave the next cell blank.
            let (next_col, next_row) = match row.next {
                Some((c, r)) => (c.to_string(), r.to_string()),
                None => (String::new(), String::new()),
            };
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.robot.to_string(),
                row.col.to_string(),
                row.row.to_string(),
                row.task_state.as_str().to_owned(),
                (row.in_step as u8).to_string(),
                next_col,
                next_row,
            ])?;
        }
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[row.tick.to_string(), row.robot.to_string(), row.event.to_owned()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
