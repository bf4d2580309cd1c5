//! Plain data row types produced by aggregation and written by backends.

/// Fleet state at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub time_hr:       f64,
    pub in_flight:     u64,
    pub charging:      u64,
    pub waiting:       u64,
    pub free_chargers: u64,
    pub queue_len:     u64,
    pub handoffs:      u64,
}

/// One vehicle's totals.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleStatsRow {
    pub vehicle_id:         u32,
    pub vehicle_type:       String,
    pub state:              String,
    pub flight_time_hr:     f64,
    pub flight_distance_mi: f64,
    pub charge_time_hr:     f64,
    pub wait_time_hr:       f64,
    pub fault_count:        u32,
    pub passenger_miles:    f64,
}

/// Aggregates over every vehicle of one type.
///
/// Charging and waiting are reported separately; add them if "time at the
/// charger" should include the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSummaryRow {
    pub vehicle_type:           String,
    pub vehicle_count:          usize,
    pub avg_flight_time_hr:     f64,
    pub avg_flight_distance_mi: f64,
    pub avg_charge_time_hr:     f64,
    pub avg_wait_time_hr:       f64,
    pub total_faults:           u64,
    pub total_passenger_miles:  f64,
}

/// How many vehicles of one type the fleet holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeupRow {
    pub vehicle_type:  String,
    pub vehicle_count: usize,
}
