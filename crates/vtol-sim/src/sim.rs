//! The `Sim` struct and its tick loop.

use tracing::{debug, info, trace};
use vtol_charger::{ChargerPool, Release};
use vtol_core::{SimClock, SimConfig, VehicleId, VehicleTypeTable};
use vtol_fleet::{LegEvent, StateCounts, Vehicle, VehicleRngs};

use crate::{SimError, SimObserver, SimResult, TickSummary};

/// Tick span of the run most recently begun, for progress reporting.
#[derive(Copy, Clone, Debug)]
struct RunWindow {
    start_tick: u64,
    ticks:      u64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns the clock, the charger pool, the fleet, and the per-vehicle
/// RNGs.  Vehicles never hold references to the pool or to each other: the
/// pool is lent to each vehicle for the duration of its tick, and hand-offs
/// name the receiving vehicle by [`VehicleId`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Configuration the fleet was built from.
    pub config: SimConfig,

    /// Vehicle-type table the fleet was drawn from.
    pub types: VehicleTypeTable,

    clock:     SimClock,
    chargers:  ChargerPool,
    vehicles:  Vec<Vehicle>,
    rngs:      VehicleRngs,
    window:    Option<RunWindow>,
    ticks_run: u64,
}

impl Sim {
    pub(crate) fn from_parts(
        chargers: ChargerPool,
        rngs:     VehicleRngs,
        clock:    SimClock,
        vehicles: Vec<Vehicle>,
        config:   SimConfig,
        types:    VehicleTypeTable,
    ) -> Self {
        Self {
            config,
            types,
            clock,
            chargers,
            vehicles,
            rngs,
            window: None,
            ticks_run: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run ticks until `duration_hr` of simulated time has elapsed.
    ///
    /// The clock stops on the first tick boundary at or past the horizon.  A
    /// shortfall of under one millionth of a tick is treated as rounding
    /// noise, so a horizon that far past a boundary stops on that boundary.
    /// Any invariant violation aborts the run and is returned as `Err`.
    pub fn run_for<O: SimObserver>(&mut self, duration_hr: f64, observer: &mut O) -> SimResult<()> {
        if !(duration_hr.is_finite() && duration_hr >= 0.0) {
            return Err(SimError::InvalidDuration(duration_hr));
        }
        let ticks = self.clock.ticks_for_hours(duration_hr);
        self.run_window(ticks, duration_hr, observer)
    }

    /// Run exactly `n` ticks from the current position.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        let hours = n as f64 * self.clock.tick_hours();
        self.run_window(n, hours, observer)
    }

    /// Move the clock to `timestamp_hr` and restart every vehicle's first
    /// flight there.  Setup only: rejected once any tick has run.
    pub fn force_time(&mut self, timestamp_hr: f64) -> SimResult<()> {
        if self.ticks_run > 0 {
            return Err(SimError::RunInProgress { ticks: self.ticks_run });
        }
        if !timestamp_hr.is_finite() {
            return Err(SimError::Config(format!("forced time {timestamp_hr} is not finite")));
        }
        self.clock.set_time(timestamp_hr);
        for vehicle in &mut self.vehicles {
            vehicle.restart_at(timestamp_hr);
        }
        Ok(())
    }

    /// Fraction of the current (or last) run completed, in `[0, 1]`.
    ///
    /// `0.0` before any run has started.
    pub fn progress(&self) -> f64 {
        match self.window {
            None => 0.0,
            Some(w) if w.ticks == 0 => 1.0,
            Some(w) => ((self.ticks_run - w.start_tick) as f64 / w.ticks as f64).min(1.0),
        }
    }

    // ── Read-only access ──────────────────────────────────────────────────

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn chargers(&self) -> &ChargerPool {
        &self.chargers
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    /// Total ticks processed since the sim was built.
    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    pub fn state_counts(&self) -> StateCounts {
        StateCounts::tally(self.vehicles.iter().map(Vehicle::state))
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn run_window<O: SimObserver>(&mut self, ticks: u64, hours: f64, observer: &mut O) -> SimResult<()> {
        self.window = Some(RunWindow { start_tick: self.ticks_run, ticks });
        info!(
            vehicles = self.vehicles.len(),
            chargers = self.chargers.total(),
            hours,
            ticks,
            "simulation run starting"
        );

        observer.on_run_start(self);
        for _ in 0..ticks {
            let summary = self.process_tick()?;
            observer.on_tick_end(&summary);
        }
        observer.on_run_end(self);

        info!(now_hr = self.clock.now(), ticks_run = self.ticks_run, "simulation run complete");
        Ok(())
    }

    fn process_tick(&mut self) -> SimResult<TickSummary> {
        self.clock.advance();
        let now = self.clock.now();
        let dt = self.clock.tick_hours();
        let faults = self.config.fault_model;
        let mut handoffs = 0;

        // ── Phase 1: tick every vehicle that was not blocked ──────────────
        //
        // A hand-off is applied to the receiving vehicle right away so the
        // station is never observed as both free and queued.
        for i in 0..self.vehicles.len() {
            if self.vehicles[i].poll_blocked(dt) {
                continue;
            }
            let id = self.vehicles[i].id();
            let event = self.vehicles[i].tick(now, dt, &mut self.chargers, self.rngs.get_mut(id), faults)?;

            if let LegEvent::Departed { release: Release::HandedOff { vehicle, at }, .. } = event {
                let receiver = self
                    .vehicles
                    .get_mut(vehicle.index())
                    .ok_or(SimError::UnknownVehicle(vehicle))?;
                receiver.accept_handoff(at, now)?;
                handoffs += 1;
                debug!(from = %id, to = %vehicle, at, "charger passed between vehicles");
            }
        }

        // ── Phase 2: snapshot blocked status for the next tick ────────────
        for vehicle in &mut self.vehicles {
            vehicle.mark_blocked();
        }

        self.ticks_run += 1;
        let counts = self.state_counts();
        trace!(
            tick = self.clock.current_tick().0,
            now_hr = now,
            in_flight = counts.in_flight,
            charging = counts.charging,
            waiting = counts.waiting,
            "tick complete"
        );

        Ok(TickSummary {
            tick:          self.clock.current_tick(),
            now_hr:        now,
            progress:      self.progress(),
            counts,
            free_chargers: self.chargers.free(),
            queue_len:     self.chargers.queue_len(),
            handoffs,
        })
    }
}
