use thiserror::Error;
use vtol_core::VehicleId;

#[derive(Debug, Error)]
pub enum ChargerError {
    #[error("{0} is already waiting for a charger")]
    AlreadyQueued(VehicleId),

    #[error("charger released while all {total} stations were already free")]
    OverRelease { total: usize },
}

pub type ChargerResult<T> = Result<T, ChargerError>;
