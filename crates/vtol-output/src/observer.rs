//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use vtol_sim::{Sim, SimObserver, TickSummary};

use crate::row::TickSummaryRow;
use crate::summary::{summarize_by_type, vehicle_rows};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries, and at the end of the run
/// per-vehicle and per-type statistics, to any [`OutputWriter`] backend.
///
/// Intended for a single run: the final tables are written and the writer
/// finished from `on_run_end`.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run_for()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:       W,
    /// Write every n-th tick summary.  Always at least 1.
    every:        u64,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer that records every tick.
    pub fn new(writer: W) -> Self {
        Self { writer, every: 1, last_error: None }
    }

    /// Only write tick summaries whose tick number is a multiple of `n`.
    pub fn every_n_ticks(mut self, n: u64) -> Self {
        self.every = n.max(1);
        self
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
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
    fn on_tick_end(&mut self, summary: &TickSummary) {
        if summary.tick.0 % self.every != 0 {
            return;
        }
        let row = TickSummaryRow {
            tick:          summary.tick.0,
            time_hr:       summary.now_hr,
            in_flight:     summary.counts.in_flight as u64,
            charging:      summary.counts.charging as u64,
            waiting:       summary.counts.waiting as u64,
            free_chargers: summary.free_chargers as u64,
            queue_len:     summary.queue_len as u64,
            handoffs:      summary.handoffs as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, sim: &Sim) {
        let result = self.writer.write_vehicle_stats(&vehicle_rows(sim.vehicles()));
        self.store_err(result);

        let result = self.writer.write_type_summaries(&summarize_by_type(&sim.types, sim.vehicles()));
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
