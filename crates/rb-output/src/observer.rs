//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use rb_agent::RobotStore;
use rb_core::{Elapsed, SimEvent, Tick};
use rb_mobility::MobilityStore;
use rb_sim::SimObserver;

use crate::row::{EventRow, RobotSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes robot snapshots and events to any
/// [`OutputWriter`] backend.
///
/// Events are buffered for the tick and written once it ends.  Writer
/// errors are stored because `SimObserver` methods have no return value;
/// check [`take_error`][Self::take_error] after `sim.run()` returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<EventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::new(), last_error: None }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn flush_events(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.pending);
        let result = self.writer.write_events(&rows);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, tick: Tick, event: SimEvent) {
        self.pending.push(EventRow::new(tick, event));
    }

    fn on_tick_end(&mut self, _tick: Tick, _moving: usize) {
        self.flush_events();
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &RobotStore, mobility: &MobilityStore) {
        let rows = RobotSnapshotRow::capture(tick, robots, &mobility.states);
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _elapsed: Elapsed) {
        self.flush_events();
        let result = self.writer.finish();
        self.store_err(result);
    }
}
