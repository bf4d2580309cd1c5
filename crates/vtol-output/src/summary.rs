//! Per-type aggregation over a finished (or paused) fleet.

use vtol_core::VehicleTypeTable;
use vtol_fleet::Vehicle;

use crate::row::{MakeupRow, TypeSummaryRow, VehicleStatsRow};

/// Vehicle count for every type in `types`, including types with none.
pub fn fleet_makeup(types: &VehicleTypeTable, vehicles: &[Vehicle]) -> Vec<MakeupRow> {
    types
        .iter()
        .map(|(id, ty)| MakeupRow {
            vehicle_type:  ty.name.clone(),
            vehicle_count: vehicles.iter().filter(|v| v.type_id() == id).count(),
        })
        .collect()
}

/// One row per type that has at least one vehicle, in table order.
pub fn summarize_by_type(types: &VehicleTypeTable, vehicles: &[Vehicle]) -> Vec<TypeSummaryRow> {
    let mut rows = Vec::new();
    for (id, ty) in types.iter() {
        let members: Vec<&Vehicle> = vehicles.iter().filter(|v| v.type_id() == id).collect();
        if members.is_empty() {
            continue;
        }
        let n = members.len() as f64;
        let mean = |f: fn(&Vehicle) -> f64| members.iter().map(|v| f(v)).sum::<f64>() / n;

        rows.push(TypeSummaryRow {
            vehicle_type:           ty.name.clone(),
            vehicle_count:          members.len(),
            avg_flight_time_hr:     mean(|v| v.stats().flight_time_hr),
            avg_flight_distance_mi: mean(|v| v.stats().flight_distance_mi),
            avg_charge_time_hr:     mean(|v| v.stats().charge_time_hr),
            avg_wait_time_hr:       mean(|v| v.stats().wait_time_hr),
            total_faults:           members.iter().map(|v| v.stats().fault_count as u64).sum(),
            total_passenger_miles:  members
                .iter()
                .map(|v| v.stats().passenger_miles(ty.passenger_count))
                .sum(),
        });
    }
    rows
}

/// Flatten every vehicle's stats into a row.
pub fn vehicle_rows(vehicles: &[Vehicle]) -> Vec<VehicleStatsRow> {
    vehicles
        .iter()
        .map(|v| {
            let stats = v.stats();
            VehicleStatsRow {
                vehicle_id:         v.id().0,
                vehicle_type:       v.spec().name.clone(),
                state:              format!("{:?}", v.state()),
                flight_time_hr:     stats.flight_time_hr,
                flight_distance_mi: stats.flight_distance_mi,
                charge_time_hr:     stats.charge_time_hr,
                wait_time_hr:       stats.wait_time_hr,
                fault_count:        stats.fault_count,
                passenger_miles:    stats.passenger_miles(v.spec().passenger_count),
            }
        })
        .collect()
}
