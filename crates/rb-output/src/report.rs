//! The plain-text times report.
//!
//! ```text
//! Total time: 00:01:42
//! id: 0 time: 00:01:17
//! id: 1 time: 00:01:42
//! id: 2 time: --
//! ```
//!
//! One line per robot in id order.  `--` marks a robot that never parked.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rb_core::Elapsed;
use rb_sim::Sim;
use rb_spatial::PathPlanner;

use crate::OutputResult;

/// Default file name for [`TimesReport::write_path`].
pub const TIMES_FILE_NAME: &str = "times.txt";

/// Total run time and each robot's most recent park time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesReport {
    pub total:      Elapsed,
    pub park_times: Vec<Option<Elapsed>>,
}

impl TimesReport {
    pub fn from_sim<P: PathPlanner>(sim: &Sim<P>) -> Self {
        Self { total: sim.elapsed(), park_times: sim.park_times.clone() }
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }

    /// Create (truncating) `path` and write the report.
    pub fn write_path(&self, path: &Path) -> OutputResult<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        Ok(())
    }
}

impl fmt::Display for TimesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total time: {}", self.total)?;
        for (id, time) in self.park_times.iter().enumerate() {
            match time {
                Some(t) => writeln!(f, "id: {id} time: {t}")?,
                None => writeln!(f, "id: {id} time: --")?,
            }
        }
        Ok(())
    }
}
