//! Unit tests for the vehicle state machine.

use std::sync::Arc;

use vtol_charger::ChargerPool;
use vtol_core::{FaultModel, VehicleId, VehicleRng, VehicleType, VehicleTypeId};

use crate::Vehicle;

// ── Helpers ───────────────────────────────────────────────────────────────────

const EPS: f64 = 1e-9;

/// 2 h flight leg (200 kWh / (1 kWh/mi * 100 mph)), 1 h charge, no faults.
fn two_hour_type() -> Arc<VehicleType> {
    Arc::new(VehicleType {
        name:                  "TwoHour".into(),
        cruise_speed_mph:      100.0,
        battery_capacity_kwh:  200.0,
        charge_time_hr:        1.0,
        energy_use_kwh_per_mi: 1.0,
        fault_prob_per_hr:     0.0,
        passenger_count:       4,
    })
}

fn vehicle(id: u32) -> Vehicle {
    Vehicle::new(VehicleId(id), VehicleTypeId(0), two_hour_type(), 0.0).unwrap()
}

fn rng() -> VehicleRng {
    VehicleRng::new(42, VehicleId(0))
}

/// Tick `v` at `now` with `dt`, no faults.
fn step(v: &mut Vehicle, now: f64, dt: f64, pool: &mut ChargerPool) -> crate::LegEvent {
    v.tick(now, dt, pool, &mut rng(), FaultModel::Bernoulli).unwrap()
}

#[cfg(test)]
mod construction {
    use vtol_core::CoreError;

    use super::*;
    use crate::{FleetError, VehicleState};

    #[test]
    fn starts_in_flight_with_first_leg_scheduled() {
        let v = Vehicle::new(VehicleId(0), VehicleTypeId(0), two_hour_type(), 1.5).unwrap();
        assert_eq!(v.state(), VehicleState::InFlight);
        assert!((v.leg_end() - 3.5).abs() < EPS);
        assert_eq!(*v.stats(), Default::default());
        assert!(!v.blocked());
    }

    #[test]
    fn rejects_unvalidated_type() {
        let mut spec = (*two_hour_type()).clone();
        spec.fault_prob_per_hr = f64::NAN;
        let err = Vehicle::new(VehicleId(0), VehicleTypeId(0), Arc::new(spec), 0.0).unwrap_err();
        assert!(matches!(
            err,
            FleetError::Core(CoreError::InvalidVehicleType { reason: "fault probability must be non-negative", .. })
        ));

        let mut spec = (*two_hour_type()).clone();
        spec.charge_time_hr = -1.0;
        assert!(Vehicle::new(VehicleId(0), VehicleTypeId(0), Arc::new(spec), 0.0).is_err());
    }

    #[test]
    fn restart_moves_the_first_leg() {
        let mut v = vehicle(0);
        v.restart_at(10.0);
        assert!((v.leg_end() - 12.0).abs() < EPS);
        assert_eq!(v.stats().flight_time_hr, 0.0);
    }
}

#[cfg(test)]
mod flight {
    use super::*;
    use crate::{LegEvent, VehicleState};

    #[test]
    fn accrues_time_and_distance_mid_leg() {
        let mut v = vehicle(0);
        let mut pool = ChargerPool::new(1);
        assert_eq!(step(&mut v, 0.5, 0.5, &mut pool), LegEvent::Continuing);
        assert!((v.stats().flight_time_hr - 0.5).abs() < EPS);
        assert!((v.stats().flight_distance_mi - 50.0).abs() < EPS);
    }

    #[test]
    fn overshoot_is_removed_when_leg_ends_mid_tick() {
        let mut v = vehicle(0);
        let mut pool = ChargerPool::new(1);
        // Ticks at 0.75, 1.5, 2.25: the 2.0 h boundary is crossed by 0.25 h.
        step(&mut v, 0.75, 0.75, &mut pool);
        step(&mut v, 1.5, 0.75, &mut pool);
        let event = step(&mut v, 2.25, 0.75, &mut pool);

        assert_eq!(event, LegEvent::Charging { at: 2.0 });
        assert_eq!(v.state(), VehicleState::Charging);
        assert!((v.stats().flight_time_hr - 2.0).abs() < EPS);
        assert!((v.stats().flight_distance_mi - 200.0).abs() < EPS);
        // The overshoot moves to charging, which started at the leg end.
        assert!((v.stats().charge_time_hr - 0.25).abs() < EPS);
        assert!((v.leg_end() - 3.0).abs() < EPS);
        assert_eq!(pool.free(), 0);
    }

    #[test]
    fn queues_with_overshoot_as_initial_wait() {
        let mut v = vehicle(0);
        let mut pool = ChargerPool::new(0);
        step(&mut v, 1.5, 1.5, &mut pool);
        let event = step(&mut v, 2.1, 0.6, &mut pool);

        assert_eq!(event, LegEvent::Queued { at: 2.0 });
        assert_eq!(v.state(), VehicleState::WaitingToCharge);
        assert!((v.stats().wait_time_hr - 0.1).abs() < EPS);
        assert!((v.stats().flight_time_hr - 2.0).abs() < EPS);
        assert!(pool.is_queued(VehicleId(0)));
        assert!((v.leg_end() - 2.0).abs() < EPS);
    }

    #[test]
    fn certain_fault_counts_once_per_tick() {
        let mut spec = (*two_hour_type()).clone();
        spec.fault_prob_per_hr = 10.0;
        let mut v = Vehicle::new(VehicleId(0), VehicleTypeId(0), Arc::new(spec), 0.0).unwrap();
        let mut pool = ChargerPool::new(1);
        let mut r = rng();
        for i in 1..=4 {
            v.tick(i as f64 * 0.25, 0.25, &mut pool, &mut r, FaultModel::Bernoulli).unwrap();
        }
        assert_eq!(v.stats().fault_count, 4);
    }
}

#[cfg(test)]
mod charging {
    use super::*;
    use crate::{LegEvent, VehicleState};
    use vtol_charger::Release;

    #[test]
    fn charge_end_releases_and_departs_from_leg_end() {
        let mut v = vehicle(0);
        let mut pool = ChargerPool::new(1);
        step(&mut v, 2.0, 2.0, &mut pool);
        assert_eq!(v.state(), VehicleState::Charging);

        let event = step(&mut v, 3.2, 1.2, &mut pool);
        assert_eq!(event, LegEvent::Departed { at: 3.0, release: Release::Freed });
        assert_eq!(v.state(), VehicleState::InFlight);
        assert!((v.stats().charge_time_hr - 1.0).abs() < EPS);
        // 0.2 h of the new flight already elapsed.
        assert!((v.stats().flight_time_hr - 2.2).abs() < EPS);
        assert!((v.stats().flight_distance_mi - 220.0).abs() < EPS);
        assert!((v.leg_end() - 5.0).abs() < EPS);
        assert_eq!(pool.free(), 1);
    }

    #[test]
    fn charge_end_hands_station_to_queue_head() {
        let mut a = vehicle(0);
        let mut b = vehicle(1);
        let mut pool = ChargerPool::new(1);
        step(&mut a, 2.0, 2.0, &mut pool);
        step(&mut b, 2.0, 2.0, &mut pool);
        assert_eq!(b.state(), VehicleState::WaitingToCharge);

        let event = step(&mut a, 3.0, 1.0, &mut pool);
        assert_eq!(
            event,
            LegEvent::Departed { at: 3.0, release: Release::HandedOff { vehicle: VehicleId(1), at: 3.0 } }
        );
        assert_eq!(pool.free(), 0);
    }
}

#[cfg(test)]
mod handoff {
    use super::*;
    use crate::{FleetError, VehicleState};

    fn queued_vehicle(pool: &mut ChargerPool) -> Vehicle {
        let mut v = vehicle(0);
        step(&mut v, 2.0, 2.0, pool);
        v.mark_blocked();
        v
    }

    #[test]
    fn handoff_moves_wait_into_charge() {
        let mut pool = ChargerPool::new(0);
        let mut v = queued_vehicle(&mut pool);
        // Two blocked ticks of 0.5 h accrue 1.0 h of provisional wait.
        assert!(v.poll_blocked(0.5));
        assert!(v.poll_blocked(0.5));
        // Station released at 2.8; it is now 3.0.
        v.accept_handoff(2.8, 3.0).unwrap();

        assert_eq!(v.state(), VehicleState::Charging);
        assert!((v.stats().wait_time_hr - 0.8).abs() < EPS);
        assert!((v.stats().charge_time_hr - 0.2).abs() < EPS);
        assert!((v.leg_end() - 3.8).abs() < EPS);
    }

    #[test]
    fn release_before_landing_in_same_tick_starts_at_landing() {
        let mut pool = ChargerPool::new(0);
        let mut v = vehicle(0);
        step(&mut v, 2.1, 2.1, &mut pool);
        // Released at 1.95, before this vehicle touched down at 2.0.
        v.accept_handoff(1.95, 2.1).unwrap();
        assert!(v.stats().wait_time_hr.abs() < EPS);
        assert!((v.stats().charge_time_hr - 0.1).abs() < EPS);
        assert!((v.leg_end() - 3.0).abs() < EPS);
    }

    #[test]
    fn handoff_to_non_waiting_vehicle_fails() {
        let mut v = vehicle(3);
        assert!(matches!(
            v.accept_handoff(0.0, 0.0),
            Err(FleetError::HandoffNotWaiting { state: VehicleState::InFlight, .. })
        ));
    }

    #[test]
    fn ticking_a_waiting_vehicle_fails_loudly() {
        let mut pool = ChargerPool::new(0);
        let mut v = queued_vehicle(&mut pool);
        let err = v.tick(2.5, 0.5, &mut pool, &mut rng(), FaultModel::Bernoulli);
        assert!(matches!(err, Err(FleetError::TickWhileWaiting(VehicleId(0)))));
    }
}

#[cfg(test)]
mod blocked {
    use super::*;

    #[test]
    fn unblocked_poll_accrues_nothing() {
        let mut v = vehicle(0);
        assert!(!v.poll_blocked(0.5));
        assert_eq!(v.stats().wait_time_hr, 0.0);
    }

    #[test]
    fn mark_blocked_is_idempotent() {
        let mut pool = ChargerPool::new(0);
        let mut v = vehicle(0);
        step(&mut v, 2.0, 2.0, &mut pool);
        assert!(!v.blocked());
        v.mark_blocked();
        assert!(v.blocked());
        v.mark_blocked();
        assert!(v.blocked());

        let mut flying = vehicle(1);
        flying.mark_blocked();
        flying.mark_blocked();
        assert!(!flying.blocked());
    }
}

#[cfg(test)]
mod stats {
    use crate::{StateCounts, VehicleState, VehicleStats};

    #[test]
    fn accounted_hours_and_passenger_miles() {
        let s = VehicleStats {
            flight_time_hr:     1.0,
            flight_distance_mi: 120.0,
            charge_time_hr:     0.5,
            wait_time_hr:       0.25,
            fault_count:        0,
        };
        assert_eq!(s.accounted_hours(), 1.75);
        assert_eq!(s.passenger_miles(4), 480.0);
    }

    #[test]
    fn tally_counts_each_state() {
        let counts = StateCounts::tally([
            VehicleState::InFlight,
            VehicleState::WaitingToCharge,
            VehicleState::InFlight,
            VehicleState::Charging,
        ]);
        assert_eq!(counts, StateCounts { in_flight: 2, charging: 1, waiting: 1 });
        assert_eq!(counts.total(), 4);
    }
}
