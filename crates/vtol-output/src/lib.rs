//! `vtol-output` — statistics aggregation and output writers for the vtol
//! fleet simulator.
//!
//! The simulation core never aggregates across vehicles.  This crate reads
//! each vehicle's stats after (or during) a run and produces:
//!
//! | Function / type         | Output                                           |
//! |-------------------------|--------------------------------------------------|
//! | [`fleet_makeup`]        | Vehicle count per type                           |
//! | [`summarize_by_type`]   | Per-type averages, fault totals, passenger miles |
//! | [`vehicle_rows`]        | One flat row per vehicle                         |
//! | [`CsvWriter`]           | `tick_summaries.csv`, `vehicle_stats.csv`, `type_summaries.csv` |
//!
//! [`SimOutputObserver`] drives any [`OutputWriter`] from the sim's observer
//! hooks.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vtol_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run_for(3.0, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{MakeupRow, TickSummaryRow, TypeSummaryRow, VehicleStatsRow};
pub use summary::{fleet_makeup, summarize_by_type, vehicle_rows};
pub use writer::OutputWriter;
