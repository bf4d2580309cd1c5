use thiserror::Error;
use vtol_charger::ChargerError;
use vtol_core::{CoreError, VehicleId};

use crate::VehicleState;

#[derive(Debug, Error)]
pub enum FleetError {
    /// The scheduler ticked a vehicle that should have been skipped.
    #[error("{0} was ticked while waiting to charge")]
    TickWhileWaiting(VehicleId),

    #[error("charger handed to {vehicle} while it was {state:?}, not waiting")]
    HandoffNotWaiting { vehicle: VehicleId, state: VehicleState },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("charger pool error: {0}")]
    Charger(#[from] ChargerError),
}

pub type FleetResult<T> = Result<T, FleetError>;
