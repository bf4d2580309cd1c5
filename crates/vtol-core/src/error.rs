//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enum via
//! `#[from]`.

use thiserror::Error;

use crate::VehicleTypeId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("tick increment must be a positive, finite number of hours (got {0})")]
    InvalidTickIncrement(f64),

    #[error("unknown vehicle type {0:?}")]
    UnknownVehicleType(String),

    #[error("vehicle type {0} is not in the table")]
    VehicleTypeOutOfRange(VehicleTypeId),

    #[error("vehicle type {name:?}: {reason}")]
    InvalidVehicleType { name: String, reason: &'static str },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `vtol-core`.
pub type CoreResult<T> = Result<T, CoreError>;
