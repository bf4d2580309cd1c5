//! Integration tests for vtol-output.

use vtol_core::{SimConfig, VehicleType, VehicleTypeId, VehicleTypeTable};
use vtol_sim::{NoopObserver, Sim, SimBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

const EPS: f64 = 1e-6;

/// Fault-free type at 100 mph and 1 kWh/mi.
fn leg_type(name: &str, flight_hr: f64, charge_hr: f64) -> VehicleType {
    VehicleType {
        name:                  name.into(),
        cruise_speed_mph:      100.0,
        battery_capacity_kwh:  100.0 * flight_hr,
        charge_time_hr:        charge_hr,
        energy_use_kwh_per_mi: 1.0,
        fault_prob_per_hr:     0.0,
        passenger_count:       2,
    }
}

/// Two "Long" vehicles (2 h out, 1 h charge), one "Short" (0.5 h out,
/// 1 h charge), and an "Idle" type nobody is assigned.  Enough chargers
/// that nobody waits.
fn three_vehicle_sim() -> Sim {
    let table = VehicleTypeTable::new(vec![
        leg_type("Long", 2.0, 1.0),
        leg_type("Short", 0.5, 1.0),
        leg_type("Idle", 1.0, 1.0),
    ])
    .unwrap();
    let config = SimConfig {
        vehicle_count:  3,
        charger_count:  3,
        tick_hours:     0.05,
        duration_hours: 3.0,
        ..SimConfig::default()
    };
    SimBuilder::new(config)
        .vehicle_types(table)
        .type_ids(vec![VehicleTypeId(0), VehicleTypeId(0), VehicleTypeId(1)])
        .build()
        .unwrap()
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod summary_tests {
    use super::*;
    use crate::summary::{fleet_makeup, summarize_by_type, vehicle_rows};

    #[test]
    fn makeup_lists_every_type() {
        let sim = three_vehicle_sim();
        let makeup = fleet_makeup(&sim.types, sim.vehicles());
        let counts: Vec<_> = makeup.iter().map(|m| (m.vehicle_type.as_str(), m.vehicle_count)).collect();
        assert_eq!(counts, [("Long", 2), ("Short", 1), ("Idle", 0)]);
    }

    #[test]
    fn summary_skips_empty_types() {
        let sim = three_vehicle_sim();
        let rows = summarize_by_type(&sim.types, sim.vehicles());
        let names: Vec<_> = rows.iter().map(|r| r.vehicle_type.as_str()).collect();
        assert_eq!(names, ["Long", "Short"]);
    }

    #[test]
    fn summary_averages_after_three_hours() {
        let mut sim = three_vehicle_sim();
        sim.run_for(3.0, &mut NoopObserver).unwrap();
        let rows = summarize_by_type(&sim.types, sim.vehicles());

        let long = &rows[0];
        assert_eq!(long.vehicle_count, 2);
        assert!((long.avg_flight_time_hr - 2.0).abs() < EPS, "{}", long.avg_flight_time_hr);
        assert!((long.avg_flight_distance_mi - 200.0).abs() < 1e-4);
        assert!((long.avg_charge_time_hr - 1.0).abs() < EPS);
        assert!(long.avg_wait_time_hr.abs() < EPS);
        assert_eq!(long.total_faults, 0);
        // 2 vehicles × 200 mi × 2 passengers
        assert!((long.total_passenger_miles - 800.0).abs() < 1e-3);

        // Short: fly 0–0.5, charge 0.5–1.5, fly 1.5–2.0, charge 2.0–3.0.
        let short = &rows[1];
        assert_eq!(short.vehicle_count, 1);
        assert!((short.avg_flight_time_hr - 1.0).abs() < EPS);
        assert!((short.avg_charge_time_hr - 2.0).abs() < EPS);
        assert!((short.total_passenger_miles - 200.0).abs() < 1e-3);
    }

    #[test]
    fn vehicle_rows_follow_fleet_order() {
        let mut sim = three_vehicle_sim();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        let rows = vehicle_rows(sim.vehicles());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].vehicle_id, 0);
        assert_eq!(rows[2].vehicle_type, "Short");
        assert_eq!(rows[2].state, "InFlight");
        assert!((rows[2].flight_time_hr - 0.25).abs() < EPS);
        assert!((rows[2].passenger_miles - 50.0).abs() < 1e-4);
    }
}

// ── CSV backend ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::TickSummaryRow;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("vehicle_stats.csv").exists());
        assert!(dir.path().join("type_summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir, "tick_summaries.csv"),
            ["tick", "time_hr", "in_flight", "charging", "waiting", "free_chargers", "queue_len", "handoffs"]
        );
        assert_eq!(headers(&dir, "vehicle_stats.csv")[..3], ["vehicle_id", "vehicle_type", "state"]);
        assert_eq!(headers(&dir, "type_summaries.csv")[..2], ["vehicle_type", "vehicle_count"]);
    }

    #[test]
    fn csv_tick_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:          4,
            time_hr:       0.2,
            in_flight:     17,
            charging:      3,
            waiting:       0,
            free_chargers: 0,
            queue_len:     0,
            handoffs:      1,
        })
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][1], "0.2");
        assert_eq!(&rows[0][2], "17");
        assert_eq!(&rows[0][7], "1");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_tables_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_vehicle_stats(&[]).unwrap();
        w.write_type_summaries(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        let mut sim = three_vehicle_sim();
        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer).every_n_ticks(10);
        sim.run_for(3.0, &mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // 60 ticks, every 10th recorded.
        let ticks = records(&dir, "tick_summaries.csv");
        assert_eq!(ticks.len(), 6);
        assert_eq!(&ticks[0][0], "10");
        assert_eq!(&ticks[5][0], "60");

        assert_eq!(records(&dir, "vehicle_stats.csv").len(), 3);

        let types = records(&dir, "type_summaries.csv");
        assert_eq!(types.len(), 2, "the unassigned type is skipped");
        assert_eq!(&types[0][0], "Long");
        assert_eq!(&types[0][1], "2");
    }
}

// ── Observer error handling ───────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::observer::SimOutputObserver;
    use crate::row::{TickSummaryRow, TypeSummaryRow, VehicleStatsRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Fails every tick write; counts everything.
    #[derive(Default)]
    struct FailingWriter {
        tick_calls:  usize,
        type_rows:   usize,
        finishes:    usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.tick_calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("tick {} rejected", row.tick))))
        }
        fn write_vehicle_stats(&mut self, _rows: &[VehicleStatsRow]) -> OutputResult<()> {
            Ok(())
        }
        fn write_type_summaries(&mut self, rows: &[TypeSummaryRow]) -> OutputResult<()> {
            self.type_rows += rows.len();
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = three_vehicle_sim();
        let mut obs = SimOutputObserver::new(FailingWriter::default());
        sim.run_ticks(3, &mut obs).unwrap();

        let err = obs.take_error().expect("stored error");
        assert!(err.to_string().contains("tick 1 rejected"), "{err}");
        assert!(obs.take_error().is_none(), "take_error clears the slot");

        let writer = obs.into_writer();
        assert_eq!(writer.tick_calls, 3, "writes continue after an error");
        assert_eq!(writer.type_rows, 2);
        assert_eq!(writer.finishes, 1);
    }
}
