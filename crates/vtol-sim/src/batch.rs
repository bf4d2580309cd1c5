//! Independent replicate runs of one scenario under different seeds.
//!
//! Each replicate builds its own clock, charger pool, and fleet, so runs
//! share nothing but the read-only vehicle-type table.

use vtol_core::{SimConfig, VehicleTypeTable};

use crate::{NoopObserver, Sim, SimBuilder, SimResult};

/// Build and run one sim per seed for `config.duration_hours`.
///
/// Results come back in `seeds` order.  With the `parallel` feature the
/// replicates run on Rayon's thread pool.
pub fn run_replicates(
    config: &SimConfig,
    types:  &VehicleTypeTable,
    seeds:  &[u64],
) -> Vec<SimResult<Sim>> {
    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run_one(config, types, seed)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds.par_iter().map(|&seed| run_one(config, types, seed)).collect()
    }
}

fn run_one(config: &SimConfig, types: &VehicleTypeTable, seed: u64) -> SimResult<Sim> {
    let config = SimConfig { seed, ..config.clone() };
    let duration = config.duration_hours;
    let mut sim = SimBuilder::new(config).vehicle_types(types.clone()).build()?;
    sim.run_for(duration, &mut NoopObserver)?;
    Ok(sim)
}
