//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use vtol_charger::ChargerPool;
use vtol_core::{
    SimClock, SimConfig, SimRng, TypeAssignment, VehicleId, VehicleTypeId, VehicleTypeTable,
};
use vtol_fleet::{Vehicle, VehicleRngs};

use crate::{Sim, SimError, SimResult};

/// Salt for the type-assignment stream so it never coincides with vehicle
/// 0's fault stream (which is seeded with the bare global seed).
const ASSIGNMENT_STREAM: u64 = 0x5851_f42d_4c95_7f2d;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — vehicle and charger counts, tick increment, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                  |
/// |----------------------|------------------------------------------|
/// | `.vehicle_types(t)`  | `VehicleTypeTable::standard()`           |
/// | `.type_ids(v)`       | Derived from `config.assignment`         |
/// | `.start_time(h)`     | `0.0`                                    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .vehicle_types(table)
///     .build()?;
/// sim.run_for(3.0, &mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    types:    Option<VehicleTypeTable>,
    type_ids: Option<Vec<VehicleTypeId>>,
    start_hr: f64,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            types:    None,
            type_ids: None,
            start_hr: 0.0,
        }
    }

    /// Supply the vehicle-type table vehicles are drawn from.
    pub fn vehicle_types(mut self, types: VehicleTypeTable) -> Self {
        self.types = Some(types);
        self
    }

    /// Assign types explicitly, one per vehicle (length `vehicle_count`).
    /// Overrides `config.assignment`.
    pub fn type_ids(mut self, type_ids: Vec<VehicleTypeId>) -> Self {
        self.type_ids = Some(type_ids);
        self
    }

    /// Timestamp at which the clock starts and every first flight begins.
    pub fn start_time(mut self, start_hr: f64) -> Self {
        self.start_hr = start_hr;
        self
    }

    /// Validate inputs, assign vehicle types, and return a ready-to-run
    /// [`Sim`] with every vehicle beginning its first flight.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let count = self.config.vehicle_count;
        let types = self.types.unwrap_or_else(VehicleTypeTable::standard);
        let clock = SimClock::new(self.start_hr, self.config.tick_hours)?;

        let type_ids = match self.type_ids {
            Some(ids) => {
                if ids.len() != count {
                    return Err(SimError::VehicleCountMismatch {
                        expected: count,
                        got:      ids.len(),
                        what:     "vehicle type ids",
                    });
                }
                ids
            }
            None => assign_types(&self.config, &types)?,
        };

        let mut vehicles = Vec::with_capacity(count);
        for (i, &type_id) in type_ids.iter().enumerate() {
            let spec = Arc::clone(types.get(type_id)?);
            vehicles.push(Vehicle::new(VehicleId(i as u32), type_id, spec, self.start_hr)?);
        }

        Ok(Sim::from_parts(
            ChargerPool::new(self.config.charger_count),
            VehicleRngs::new(count, self.config.seed),
            clock,
            vehicles,
            self.config,
            types,
        ))
    }
}

/// Resolve `config.assignment` into one type ID per vehicle.
fn assign_types(config: &SimConfig, types: &VehicleTypeTable) -> SimResult<Vec<VehicleTypeId>> {
    let count = config.vehicle_count;
    if count > 0 && types.is_empty() {
        return Err(SimError::Config("vehicle type table is empty".into()));
    }
    let ids = match &config.assignment {
        TypeAssignment::Fixed(_) => {
            let id = config
                .assignment
                .fixed_id(types)?
                .ok_or_else(|| SimError::Config("fixed assignment without a type".into()))?;
            vec![id; count]
        }
        TypeAssignment::RoundRobin => (0..count)
            .map(|i| VehicleTypeId((i % types.len()) as u16))
            .collect(),
        TypeAssignment::Random => {
            let mut rng = SimRng::new(config.seed ^ ASSIGNMENT_STREAM);
            (0..count)
                .map(|_| VehicleTypeId(rng.gen_range(0..types.len()) as u16))
                .collect()
        }
    };
    Ok(ids)
}
