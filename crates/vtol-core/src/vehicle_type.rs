//! Per-vehicle-type physical constants and the lookup table that holds them.
//!
//! A [`VehicleType`] is immutable once it enters a [`VehicleTypeTable`]; the
//! table hands out `Arc<VehicleType>` so every vehicle of a type shares one
//! record.

use std::sync::Arc;

use crate::{CoreError, CoreResult, VehicleTypeId};

/// Physical constants for one vehicle category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleType {
    /// Display name, unique within a table (compared case-insensitively).
    pub name: String,
    pub cruise_speed_mph: f64,
    pub battery_capacity_kwh: f64,
    /// Hours to charge from empty to full.
    pub charge_time_hr: f64,
    pub energy_use_kwh_per_mi: f64,
    pub fault_prob_per_hr: f64,
    pub passenger_count: u32,
}

impl VehicleType {
    /// Hours of cruise flight on a full battery:
    /// `battery / (energy_per_mile * cruise_speed)`.
    #[inline]
    pub fn flight_leg_hours(&self) -> f64 {
        self.battery_capacity_kwh / self.cruise_power_kw()
    }

    /// Power drawn at cruise speed, in kW.
    #[inline]
    pub fn cruise_power_kw(&self) -> f64 {
        self.energy_use_kwh_per_mi * self.cruise_speed_mph
    }

    /// Reject records whose legs would be empty, infinite, or negative.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason| CoreError::InvalidVehicleType { name: self.name.clone(), reason };
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if !(self.cruise_speed_mph.is_finite() && self.cruise_speed_mph > 0.0) {
            return Err(invalid("cruise speed must be positive"));
        }
        if !(self.battery_capacity_kwh.is_finite() && self.battery_capacity_kwh > 0.0) {
            return Err(invalid("battery capacity must be positive"));
        }
        if !(self.energy_use_kwh_per_mi.is_finite() && self.energy_use_kwh_per_mi > 0.0) {
            return Err(invalid("energy use must be positive"));
        }
        if !(self.charge_time_hr.is_finite() && self.charge_time_hr > 0.0) {
            return Err(invalid("charge time must be positive"));
        }
        if !(self.fault_prob_per_hr.is_finite() && self.fault_prob_per_hr >= 0.0) {
            return Err(invalid("fault probability must be non-negative"));
        }
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn stock(
    name: &str,
    cruise_speed_mph: f64,
    battery_capacity_kwh: f64,
    charge_time_hr: f64,
    energy_use_kwh_per_mi: f64,
    fault_prob_per_hr: f64,
    passenger_count: u32,
) -> VehicleType {
    VehicleType {
        name: name.to_owned(),
        cruise_speed_mph,
        battery_capacity_kwh,
        charge_time_hr,
        energy_use_kwh_per_mi,
        fault_prob_per_hr,
        passenger_count,
    }
}

// ── VehicleTypeTable ──────────────────────────────────────────────────────────

/// Read-only lookup from [`VehicleTypeId`] or name to a [`VehicleType`].
#[derive(Clone, Debug)]
pub struct VehicleTypeTable {
    types: Vec<Arc<VehicleType>>,
}

impl VehicleTypeTable {
    /// Build a table, validating every record and rejecting duplicate names.
    pub fn new(types: Vec<VehicleType>) -> CoreResult<Self> {
        if types.len() > u16::MAX as usize {
            return Err(CoreError::Config(format!("{} vehicle types exceed the table limit", types.len())));
        }
        for (i, ty) in types.iter().enumerate() {
            ty.validate()?;
            if types[..i].iter().any(|other| other.name.eq_ignore_ascii_case(&ty.name)) {
                return Err(CoreError::InvalidVehicleType {
                    name:   ty.name.clone(),
                    reason: "duplicate name",
                });
            }
        }
        Ok(Self { types: types.into_iter().map(Arc::new).collect() })
    }

    /// The five stock vehicle types: Alpha, Bravo, Charlie, Delta, Echo.
    pub fn standard() -> Self {
        let types = vec![
            stock("Alpha",   120.0, 320.0, 0.60, 1.6, 0.25, 4),
            stock("Bravo",   100.0, 100.0, 0.20, 1.5, 0.10, 5),
            stock("Charlie", 160.0, 220.0, 0.80, 2.2, 0.05, 3),
            stock("Delta",    90.0, 120.0, 0.62, 0.8, 0.22, 2),
            stock("Echo",     90.0, 120.0, 0.62, 0.8, 0.22, 2),
        ];
        Self { types: types.into_iter().map(Arc::new).collect() }
    }

    /// Shared handle to the type with `id`.
    pub fn get(&self, id: VehicleTypeId) -> CoreResult<&Arc<VehicleType>> {
        self.types.get(id.index()).ok_or(CoreError::VehicleTypeOutOfRange(id))
    }

    /// Look up a type ID by name (ASCII case-insensitive).
    pub fn id_by_name(&self, name: &str) -> CoreResult<VehicleTypeId> {
        self.types
            .iter()
            .position(|ty| ty.name.eq_ignore_ascii_case(name))
            .map(|i| VehicleTypeId(i as u16))
            .ok_or_else(|| CoreError::UnknownVehicleType(name.to_owned()))
    }

    /// All `(id, type)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleTypeId, &Arc<VehicleType>)> {
        self.types.iter().enumerate().map(|(i, ty)| (VehicleTypeId(i as u16), ty))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for VehicleTypeTable {
    fn default() -> Self {
        Self::standard()
    }
}
