//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickSummaryRow, TypeSummaryRow, VehicleStatsRow};

/// Trait implemented by output backends.
///
/// Errors are stored by [`SimOutputObserver`](crate::SimOutputObserver)
/// and retrieved with `take_error`.
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the final per-vehicle rows.
    fn write_vehicle_stats(&mut self, rows: &[VehicleStatsRow]) -> OutputResult<()>;

    /// Write the final per-type rows.
    fn write_type_summaries(&mut self, rows: &[TypeSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
