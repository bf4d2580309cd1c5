use thiserror::Error;
use vtol_core::{CoreError, VehicleId};
use vtol_fleet::FleetError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match vehicle count {expected}")]
    VehicleCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("run duration must be a non-negative number of hours (got {0})")]
    InvalidDuration(f64),

    #[error("cannot force the clock after {ticks} ticks have run")]
    RunInProgress { ticks: u64 },

    #[error("charger handed to {0}, which is not in the fleet")]
    UnknownVehicle(VehicleId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("vehicle error: {0}")]
    Fleet(#[from] FleetError),
}

pub type SimResult<T> = Result<T, SimError>;
