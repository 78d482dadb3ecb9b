//! `rb-output`: run output for the robot courier simulator.
//!
//! Two snapshot/event backends, plus the times report:
//!
//! | Feature   | Backend | Files created                               |
//! |-----------|---------|---------------------------------------------|
//! | *(none)*  | CSV     | `robot_snapshots.csv`, `events.csv`         |
//! | `sqlite`  | SQLite  | `output.db`                                 |
//! | *(any)*   | report  | `times.txt` (see [`report`])                |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `rb_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rb_output::{CsvWriter, SimOutputObserver, TimesReport};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! TimesReport::from_sim(&sim).write_path(Path::new("./output/times.txt"))?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use report::{TimesReport, TIMES_FILE_NAME};
pub use row::{EventRow, RobotSnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
