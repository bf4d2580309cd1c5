//! three_hour — the stock vtol fleet run.
//!
//! Twenty vehicles drawn at random from the five stock types share three
//! chargers for three simulated hours.  Every knob can be changed from a
//! TOML scenario file (`--config`) and individual flags override the file.
//!
//! ```text
//! three_hour                                  # stock run
//! three_hour --vehicles 50 --chargers 6 -v    # bigger fleet, debug logs
//! three_hour --config scenario.toml --output output/run1
//! ```

mod scenario;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vtol_core::{FaultModel, SimConfig, TypeAssignment};
use vtol_output::{CsvWriter, SimOutputObserver, fleet_makeup, summarize_by_type};
use vtol_sim::{Sim, SimBuilder, SimObserver, TickSummary};

use scenario::{Scenario, load_scenario};

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Simulate a fleet of electric VTOL aircraft sharing a small pool of chargers.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// TOML scenario file ([sim] overrides and optional [[vehicle_types]])
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of vehicles in the fleet
    #[arg(long)]
    vehicles: Option<usize>,

    /// Number of charging stations
    #[arg(long)]
    chargers: Option<usize>,

    /// Simulated hours to run
    #[arg(long)]
    hours: Option<f64>,

    /// Hours per tick
    #[arg(long)]
    tick: Option<f64>,

    /// Master RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Give every vehicle this type (case-insensitive)
    #[arg(long, conflicts_with = "round_robin")]
    vehicle_type: Option<String>,

    /// Assign types in table order instead of at random
    #[arg(long)]
    round_robin: bool,

    /// Use the Poisson fault model instead of per-tick Bernoulli
    #[arg(long)]
    poisson: bool,

    /// Write tick, vehicle and type CSVs to this directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(n) = self.vehicles {
            config.vehicle_count = n;
        }
        if let Some(n) = self.chargers {
            config.charger_count = n;
        }
        if let Some(h) = self.hours {
            config.duration_hours = h;
        }
        if let Some(dt) = self.tick {
            config.tick_hours = dt;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(name) = &self.vehicle_type {
            config.assignment = TypeAssignment::Fixed(name.clone());
        } else if self.round_robin {
            config.assignment = TypeAssignment::RoundRobin;
        }
        if self.poisson {
            config.fault_model = FaultModel::Poisson;
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs every 10 % of the run and forwards to the CSV observer if one is set.
struct DemoObserver {
    output:      Option<SimOutputObserver<CsvWriter>>,
    next_decile: u32,
}

impl SimObserver for DemoObserver {
    fn on_run_start(&mut self, sim: &Sim) {
        self.next_decile = 1;
        if let Some(out) = &mut self.output {
            out.on_run_start(sim);
        }
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        while self.next_decile <= 10 && summary.progress * 10.0 >= self.next_decile as f64 - 1e-9 {
            info!(
                percent = self.next_decile * 10,
                now_hr = summary.now_hr,
                in_flight = summary.counts.in_flight,
                charging = summary.counts.charging,
                waiting = summary.counts.waiting,
                "progress"
            );
            self.next_decile += 1;
        }
        if let Some(out) = &mut self.output {
            out.on_tick_end(summary);
        }
    }

    fn on_run_end(&mut self, sim: &Sim) {
        if let Some(out) = &mut self.output {
            out.on_run_end(sim);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    // 1. Scenario: file (if any), then flag overrides.
    let scenario = match &cli.config {
        Some(path) => load_scenario(path)?,
        None => Scenario::default(),
    };
    let types = scenario.type_table()?;
    let mut config = scenario.sim.clone();
    cli.apply(&mut config);
    let duration = config.duration_hours;

    // 2. Build the fleet.
    let mut sim = SimBuilder::new(config).vehicle_types(types).build()?;

    println!("=== three_hour — vtol fleet simulation ===");
    println!(
        "Vehicles: {}  |  Chargers: {}  |  Hours: {}  |  Tick: {} h  |  Seed: {}",
        sim.config.vehicle_count,
        sim.config.charger_count,
        duration,
        sim.config.tick_hours,
        sim.config.seed,
    );
    println!();
    println!("Fleet makeup:");
    for row in fleet_makeup(&sim.types, sim.vehicles()) {
        println!("  {:<10} {:>4}", row.vehicle_type, row.vehicle_count);
    }
    println!();

    // 3. Output.
    let output = match &cli.output {
        Some(dir) => Some(SimOutputObserver::new(CsvWriter::new(dir)?)),
        None => None,
    };
    let mut obs = DemoObserver { output, next_decile: 1 };

    // 4. Run.
    let t0 = Instant::now();
    sim.run_for(duration, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.output.as_mut().and_then(SimOutputObserver::take_error) {
        bail!("output error: {e}");
    }
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), sim.ticks_run());
    if let Some(dir) = &cli.output {
        println!("CSV output written to {}", dir.display());
    }
    println!();

    // 5. Per-type statistics.
    let summaries = summarize_by_type(&sim.types, sim.vehicles());
    for (_, ty) in sim.types.iter() {
        let Some(row) = summaries.iter().find(|r| r.vehicle_type == ty.name) else {
            println!("No vehicles instantiated for {}", ty.name);
            println!();
            continue;
        };
        println!("{}  ({} vehicles)", row.vehicle_type, row.vehicle_count);
        println!("  {:<28} {:>10.3}", "avg flight time (hr)", row.avg_flight_time_hr);
        println!("  {:<28} {:>10.3}", "avg flight distance (mi)", row.avg_flight_distance_mi);
        println!("  {:<28} {:>10.3}", "avg charge time (hr)", row.avg_charge_time_hr);
        println!("  {:<28} {:>10.3}", "avg wait time (hr)", row.avg_wait_time_hr);
        println!("  {:<28} {:>10}", "total faults", row.total_faults);
        println!("  {:<28} {:>10.1}", "total passenger miles", row.total_passenger_miles);
        println!();
    }

    Ok(())
}
