//! TOML scenario files.
//!
//! ```toml
//! [sim]
//! vehicle_count  = 40
//! charger_count  = 5
//! tick_hours     = 0.01
//! fault_model    = "poisson"
//! assignment     = { fixed = "Bravo" }
//!
//! [[vehicle_types]]
//! name                  = "Bravo"
//! cruise_speed_mph      = 100.0
//! battery_capacity_kwh  = 100.0
//! charge_time_hr        = 0.2
//! energy_use_kwh_per_mi = 1.5
//! fault_prob_per_hr     = 0.10
//! passenger_count       = 5
//! ```
//!
//! Every `[sim]` key is optional.  When `[[vehicle_types]]` is absent the
//! stock five-type table is used.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use vtol_core::{SimConfig, VehicleType, VehicleTypeTable};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub sim:           SimConfig,
    pub vehicle_types: Vec<VehicleType>,
}

impl Scenario {
    /// The type table this scenario flies: its own entries, or the stock set.
    pub fn type_table(&self) -> Result<VehicleTypeTable> {
        if self.vehicle_types.is_empty() {
            return Ok(VehicleTypeTable::standard());
        }
        VehicleTypeTable::new(self.vehicle_types.clone()).context("invalid [[vehicle_types]] entry")
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing scenario file {}", path.display()))
}
