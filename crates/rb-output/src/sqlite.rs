//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` in the configured output directory with two
//! tables, `robot_snapshots` and `events`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, RobotSnapshotRow};

pub const DB_FILE_NAME: &str = "output.db";

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DB_FILE_NAME))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS robot_snapshots (
                 tick       INTEGER NOT NULL,
                 robot      INTEGER NOT NULL,
                 col        INTEGER NOT NULL,
                 row        INTEGER NOT NULL,
                 task_state TEXT    NOT NULL,
                 in_step    INTEGER NOT NULL,
                 next_col   INTEGER,
                 next_row   INTEGER
             );
             CREATE TABLE IF NOT EXISTS events (
                 tick  INTEGER NOT NULL,
                 robot INTEGER NOT NULL,
                 event TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO robot_snapshots \
                 (tick, robot, col, row, task_state, in_step, next_col, next_row) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.robot,
                    row.col,
                    row.row,
                    row.task_state.as_str(),
                    row.in_step as i64,
                    row.next.map(|(c, _)| c),
                    row.next.map(|(_, r)| r),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached("INSERT INTO events (tick, robot, event) VALUES (?1, ?2, ?3)")?;
            for row in rows {
                stmt.execute(rusqlite::params![row.tick as i64, row.robot, row.event])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
