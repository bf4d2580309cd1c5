//! The per-tick fault trial.
//!
//! The state machine draws exactly one trial per in-flight tick.  How the
//! hourly fault rate maps to a per-tick probability is chosen here and
//! nowhere else.

use crate::VehicleRng;

/// Mapping from an hourly fault rate to a per-tick fault probability.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FaultModel {
    /// `rate * dt`, clamped to 1.  Assumes a uniform hazard and `dt <= 1 h`.
    #[default]
    Bernoulli,
    /// `1 - exp(-rate * dt)`: the chance of at least one event of a Poisson
    /// process over the tick.
    Poisson,
}

impl FaultModel {
    /// Probability that at least one fault occurs during a tick of `dt_hr`.
    pub fn probability(self, rate_per_hr: f64, dt_hr: f64) -> f64 {
        let exposure = (rate_per_hr * dt_hr).max(0.0);
        match self {
            FaultModel::Bernoulli => exposure.min(1.0),
            FaultModel::Poisson => 1.0 - (-exposure).exp(),
        }
    }

    /// Draw one trial.  Returns `true` when a fault occurred.
    #[inline]
    pub fn trial(self, rate_per_hr: f64, dt_hr: f64, rng: &mut VehicleRng) -> bool {
        rng.gen_bool(self.probability(rate_per_hr, dt_hr))
    }
}
