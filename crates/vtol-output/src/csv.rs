//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `tick_summaries.csv`
//! - `vehicle_stats.csv`
//! - `type_summaries.csv`

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TypeSummaryRow, VehicleStatsRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    dir:       PathBuf,
    ticks:     Writer<File>,
    vehicles:  Writer<File>,
    types:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut ticks = Writer::from_path(dir.join("tick_summaries.csv"))?;
        ticks.write_record([
            "tick",
            "time_hr",
            "in_flight",
            "charging",
            "waiting",
            "free_chargers",
            "queue_len",
            "handoffs",
        ])?;

        let mut vehicles = Writer::from_path(dir.join("vehicle_stats.csv"))?;
        vehicles.write_record([
            "vehicle_id",
            "vehicle_type",
            "state",
            "flight_time_hr",
            "flight_distance_mi",
            "charge_time_hr",
            "wait_time_hr",
            "fault_count",
            "passenger_miles",
        ])?;

        let mut types = Writer::from_path(dir.join("type_summaries.csv"))?;
        types.write_record([
            "vehicle_type",
            "vehicle_count",
            "avg_flight_time_hr",
            "avg_flight_distance_mi",
            "avg_charge_time_hr",
            "avg_wait_time_hr",
            "total_faults",
            "total_passenger_miles",
        ])?;

        Ok(Self {
            dir: dir.to_path_buf(),
            ticks,
            vehicles,
            types,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.ticks.write_record(&[
            row.tick.to_string(),
            row.time_hr.to_string(),
            row.in_flight.to_string(),
            row.charging.to_string(),
            row.waiting.to_string(),
            row.free_chargers.to_string(),
            row.queue_len.to_string(),
            row.handoffs.to_string(),
        ])?;
        Ok(())
    }

    fn write_vehicle_stats(&mut self, rows: &[VehicleStatsRow]) -> OutputResult<()> {
        for row in rows {
            self.vehicles.write_record(&[
                row.vehicle_id.to_string(),
                row.vehicle_type.clone(),
                row.state.clone(),
                row.flight_time_hr.to_string(),
                row.flight_distance_mi.to_string(),
                row.charge_time_hr.to_string(),
                row.wait_time_hr.to_string(),
                row.fault_count.to_string(),
                row.passenger_miles.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_type_summaries(&mut self, rows: &[TypeSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.types.write_record(&[
                row.vehicle_type.clone(),
                row.vehicle_count.to_string(),
                row.avg_flight_time_hr.to_string(),
                row.avg_flight_distance_mi.to_string(),
                row.avg_charge_time_hr.to_string(),
                row.avg_wait_time_hr.to_string(),
                row.total_faults.to_string(),
                row.total_passenger_miles.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ticks.flush()?;
        self.vehicles.flush()?;
        self.types.flush()?;
        debug!(dir = %self.dir.display(), "csv output flushed");
        Ok(())
    }
}
