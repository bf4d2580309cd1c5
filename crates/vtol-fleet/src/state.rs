//! Vehicle FSM states and accumulated statistics.

/// The three states of the flight/charge cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VehicleState {
    InFlight,
    Charging,
    /// Landed with no free station; sits in the charger wait queue.
    WaitingToCharge,
}

/// Totals accrued by one vehicle over a run.
///
/// Values only grow, apart from the corrections applied when a leg ends
/// mid-tick; those remove at most one tick of overcount.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VehicleStats {
    pub flight_time_hr:     f64,
    pub flight_distance_mi: f64,
    /// Time connected to a station.  Excludes queueing.
    pub charge_time_hr:     f64,
    /// Time spent in the wait queue.
    pub wait_time_hr:       f64,
    pub fault_count:        u32,
}

impl VehicleStats {
    /// Flight + charge + wait.  Matches elapsed simulated time to within one
    /// tick increment.
    #[inline]
    pub fn accounted_hours(&self) -> f64 {
        self.flight_time_hr + self.charge_time_hr + self.wait_time_hr
    }

    #[inline]
    pub fn passenger_miles(&self, passenger_count: u32) -> f64 {
        self.flight_distance_mi * passenger_count as f64
    }
}

/// How many vehicles sit in each state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub in_flight: usize,
    pub charging:  usize,
    pub waiting:   usize,
}

impl StateCounts {
    pub fn tally<I: IntoIterator<Item = VehicleState>>(states: I) -> Self {
        let mut counts = Self::default();
        for state in states {
            match state {
                VehicleState::InFlight        => counts.in_flight += 1,
                VehicleState::Charging        => counts.charging += 1,
                VehicleState::WaitingToCharge => counts.waiting += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.in_flight + self.charging + self.waiting
    }
}
