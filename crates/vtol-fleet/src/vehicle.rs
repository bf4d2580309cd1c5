//! The `Vehicle` state machine.
//!
//! # Overshoot correction
//!
//! Leg completion is only noticed on the first tick at or after the exact
//! leg boundary.  Each leg-ending tick therefore first accrues a full `dt`
//! and then subtracts `overshoot = now - leg_end` from the state that just
//! ended.  The next leg starts at `leg_end`, not `now`, and
//! `start_flight`/`start_charge` add the same `overshoot` back to the new
//! state, so the three time totals always sum to the elapsed time.

use std::sync::Arc;

use tracing::debug;
use vtol_charger::{ChargerPool, Release};
use vtol_core::{FaultModel, VehicleId, VehicleRng, VehicleType, VehicleTypeId};

use crate::{FleetError, FleetResult, VehicleState, VehicleStats};

/// What a call to [`Vehicle::tick`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LegEvent {
    /// The current leg has not ended yet.
    Continuing,
    /// Flight ended at `at` and a station was free; charging began at `at`.
    Charging { at: f64 },
    /// Flight ended at `at` with no station free; the vehicle is queued.
    Queued { at: f64 },
    /// Charging ended at `at`; a new flight began at `at` and the station
    /// was released.  A [`Release::HandedOff`] must be applied by the caller
    /// before any other vehicle is ticked.
    Departed { at: f64, release: Release },
}

/// One vehicle: its type, FSM state, current leg end, and running totals.
#[derive(Clone, Debug)]
pub struct Vehicle {
    id:         VehicleId,
    type_id:    VehicleTypeId,
    spec:       Arc<VehicleType>,
    state:      VehicleState,
    /// End of the current flight or charge.  While waiting, the landing time.
    leg_end_hr: f64,
    /// Snapshot of `state == WaitingToCharge` taken between tick phases.
    blocked:    bool,
    stats:      VehicleStats,
}

impl Vehicle {
    /// Create a vehicle that begins its first flight at `start_hr`.
    ///
    /// Fails if `spec` does not pass [`VehicleType::validate`].
    pub fn new(
        id:       VehicleId,
        type_id:  VehicleTypeId,
        spec:     Arc<VehicleType>,
        start_hr: f64,
    ) -> FleetResult<Self> {
        spec.validate()?;
        Ok(Self::fresh(id, type_id, spec, start_hr))
    }

    /// Discard all progress and begin a fresh first flight at `start_hr`.
    ///
    /// Only meaningful before the first tick of a run.
    pub fn restart_at(&mut self, start_hr: f64) {
        *self = Self::fresh(self.id, self.type_id, Arc::clone(&self.spec), start_hr);
    }

    fn fresh(id: VehicleId, type_id: VehicleTypeId, spec: Arc<VehicleType>, start_hr: f64) -> Self {
        let mut vehicle = Self {
            id,
            type_id,
            spec,
            state:      VehicleState::InFlight,
            leg_end_hr: start_hr,
            blocked:    false,
            stats:      VehicleStats::default(),
        };
        vehicle.start_flight(start_hr, start_hr);
        vehicle
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn type_id(&self) -> VehicleTypeId {
        self.type_id
    }

    #[inline]
    pub fn spec(&self) -> &VehicleType {
        &self.spec
    }

    #[inline]
    pub fn state(&self) -> VehicleState {
        self.state
    }

    #[inline]
    pub fn leg_end(&self) -> f64 {
        self.leg_end_hr
    }

    /// The flag set by the last [`mark_blocked`](Self::mark_blocked).
    #[inline]
    pub fn blocked(&self) -> bool {
        self.blocked
    }

    #[inline]
    pub fn stats(&self) -> &VehicleStats {
        &self.stats
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Advance this vehicle through one tick ending at `now`.
    ///
    /// Draws one fault trial per in-flight tick.  Calling this on a vehicle
    /// in `WaitingToCharge` is a scheduler bug and returns
    /// [`FleetError::TickWhileWaiting`].
    pub fn tick(
        &mut self,
        now:      f64,
        dt:       f64,
        chargers: &mut ChargerPool,
        rng:      &mut VehicleRng,
        faults:   FaultModel,
    ) -> FleetResult<LegEvent> {
        match self.state {
            VehicleState::InFlight => {
                let speed = self.spec.cruise_speed_mph;
                self.stats.flight_time_hr += dt;
                self.stats.flight_distance_mi += speed * dt;
                if faults.trial(self.spec.fault_prob_per_hr, dt, rng) {
                    self.stats.fault_count += 1;
                }

                if now < self.leg_end_hr {
                    return Ok(LegEvent::Continuing);
                }

                let landed = self.leg_end_hr;
                let overshoot = now - landed;
                self.stats.flight_time_hr -= overshoot;
                self.stats.flight_distance_mi -= overshoot * speed;

                if chargers.try_acquire(self.id)? {
                    self.start_charge(landed, now);
                    debug!(vehicle = %self.id, at = landed, "landed, charging");
                    Ok(LegEvent::Charging { at: landed })
                } else {
                    self.state = VehicleState::WaitingToCharge;
                    self.stats.wait_time_hr += overshoot;
                    debug!(vehicle = %self.id, at = landed, "landed, waiting for charger");
                    Ok(LegEvent::Queued { at: landed })
                }
            }

            VehicleState::Charging => {
                self.stats.charge_time_hr += dt;

                if now < self.leg_end_hr {
                    return Ok(LegEvent::Continuing);
                }

                let charged = self.leg_end_hr;
                self.stats.charge_time_hr -= now - charged;
                self.start_flight(charged, now);
                let release = chargers.release(charged)?;
                debug!(vehicle = %self.id, at = charged, "charged, departing");
                Ok(LegEvent::Departed { at: charged, release })
            }

            VehicleState::WaitingToCharge => Err(FleetError::TickWhileWaiting(self.id)),
        }
    }

    /// Take over a station released at `at` while this vehicle was queued.
    ///
    /// Charging starts at `at`, or at the landing time if the station was
    /// released earlier in the same tick than this vehicle landed.
    pub fn accept_handoff(&mut self, at: f64, now: f64) -> FleetResult<()> {
        if self.state != VehicleState::WaitingToCharge {
            return Err(FleetError::HandoffNotWaiting { vehicle: self.id, state: self.state });
        }
        self.start_charge(at, now);
        debug!(vehicle = %self.id, at, "charger handed off");
        Ok(())
    }

    /// Begin a flight leg at `start_hr`, crediting `now - start_hr` of
    /// flight that has already elapsed.
    pub(crate) fn start_flight(&mut self, start_hr: f64, now: f64) {
        self.leg_end_hr = start_hr + self.spec.flight_leg_hours();
        let elapsed = now - start_hr;
        self.stats.flight_time_hr += elapsed;
        self.stats.flight_distance_mi += elapsed * self.spec.cruise_speed_mph;
        self.state = VehicleState::InFlight;
    }

    /// Begin a charge leg at `start_hr`, crediting `now - start_hr` of
    /// charging that has already elapsed.  Coming out of the wait queue, the
    /// same amount is taken back off the accrued wait time.
    pub(crate) fn start_charge(&mut self, start_hr: f64, now: f64) {
        let was_waiting = self.state == VehicleState::WaitingToCharge;
        // A waiting vehicle's leg_end is its landing time.
        let start_hr = if was_waiting { start_hr.max(self.leg_end_hr) } else { start_hr };
        let elapsed = now - start_hr;

        self.leg_end_hr = start_hr + self.spec.charge_time_hr;
        self.stats.charge_time_hr += elapsed;
        if was_waiting {
            self.stats.wait_time_hr -= elapsed;
        }
        self.state = VehicleState::Charging;
    }

    // ── Blocked bookkeeping ───────────────────────────────────────────────

    /// Phase-1 check: is this vehicle to be skipped this tick?
    ///
    /// Returns the `blocked` flag.  A blocked vehicle accrues one tick of
    /// wait time per call; the excess is taken back when charging begins.
    pub fn poll_blocked(&mut self, dt: f64) -> bool {
        if self.blocked {
            self.stats.wait_time_hr += dt;
        }
        self.blocked
    }

    /// Phase-2 update: set `blocked` to whether the vehicle is now waiting.
    pub fn mark_blocked(&mut self) {
        self.blocked = self.state == VehicleState::WaitingToCharge;
    }
}
