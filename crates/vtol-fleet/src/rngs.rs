//! Per-vehicle fault RNGs, kept in their own struct beside the fleet `Vec`.
//!
//! The tick loop needs `&mut Vehicle`, `&mut ChargerPool`, and the vehicle's
//! RNG at the same time.  Holding the RNGs in a separate struct keeps those
//! borrows on disjoint fields of the simulation.

use vtol_core::{VehicleId, VehicleRng};

pub struct VehicleRngs {
    pub inner: Vec<VehicleRng>,
}

impl VehicleRngs {
    /// Allocate and seed `count` per-vehicle RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| VehicleRng::new(global_seed, VehicleId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one vehicle's RNG.
    #[inline]
    pub fn get_mut(&mut self, vehicle: VehicleId) -> &mut VehicleRng {
        &mut self.inner[vehicle.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
