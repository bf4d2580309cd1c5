//! Simulation observer trait for progress reporting and data collection.

use vtol_core::Tick;
use vtol_fleet::StateCounts;

use crate::Sim;

/// What happened during one tick, handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickSummary {
    pub tick:          Tick,
    /// Clock reading at the end of the tick, in hours.
    pub now_hr:        f64,
    /// Fraction of the current run completed, in `[0, 1]`.
    pub progress:      f64,
    pub counts:        StateCounts,
    pub free_chargers: usize,
    pub queue_len:     usize,
    /// Stations passed directly from a departing vehicle to a waiting one.
    pub handoffs:      usize,
}

/// Callbacks invoked by [`Sim::run_for`] and [`Sim::run_ticks`].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Percent;
///
/// impl SimObserver for Percent {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         print!("\r{:>3.0}% complete", summary.progress * 100.0);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first tick of a run.
    fn on_run_start(&mut self, _sim: &Sim) {}

    /// Called after both phases of every tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called once after the final tick.  Vehicle stats are final here.
    fn on_run_end(&mut self, _sim: &Sim) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
