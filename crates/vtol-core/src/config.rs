//! Top-level simulation configuration.
//!
//! Typically loaded from a TOML file by the application crate and passed to
//! the fleet builder.  `SimConfig::default()` is the stock scenario: 20
//! vehicles sharing 3 chargers for 3 simulated hours at 0.05 h per tick.

use crate::{CoreError, CoreResult, FaultModel, VehicleTypeId, VehicleTypeTable};

/// How vehicle types are assigned when the fleet is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TypeAssignment {
    /// Uniformly random type per vehicle, drawn from the run seed.
    #[default]
    Random,
    /// Every vehicle gets the named type.
    Fixed(String),
    /// Vehicle `i` gets table entry `i % table.len()`.
    RoundRobin,
}

impl TypeAssignment {
    /// Resolve a [`TypeAssignment::Fixed`] name against `table`.
    ///
    /// Returns `Ok(None)` for the other variants.
    pub fn fixed_id(&self, table: &VehicleTypeTable) -> CoreResult<Option<VehicleTypeId>> {
        match self {
            TypeAssignment::Fixed(name) => table.id_by_name(name).map(Some),
            TypeAssignment::Random | TypeAssignment::RoundRobin => Ok(None),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub vehicle_count: usize,

    pub charger_count: usize,

    /// Hours per tick.  Must be strictly positive.
    pub tick_hours: f64,

    /// Horizon passed to `run_for` by the application.
    pub duration_hours: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub assignment: TypeAssignment,

    pub fault_model: FaultModel,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            vehicle_count:  20,
            charger_count:  3,
            tick_hours:     0.05,
            duration_hours: 3.0,
            seed:           42,
            assignment:     TypeAssignment::Random,
            fault_model:    FaultModel::Bernoulli,
        }
    }
}

impl SimConfig {
    /// Check the fields that do not need a vehicle-type table.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.tick_hours.is_finite() && self.tick_hours > 0.0) {
            return Err(CoreError::InvalidTickIncrement(self.tick_hours));
        }
        if !(self.duration_hours.is_finite() && self.duration_hours >= 0.0) {
            return Err(CoreError::Config(format!(
                "duration must be a non-negative number of hours (got {})",
                self.duration_hours
            )));
        }
        if u32::try_from(self.vehicle_count).is_err() {
            return Err(CoreError::Config(format!("{} vehicles exceed the fleet limit", self.vehicle_count)));
        }
        Ok(())
    }
}
