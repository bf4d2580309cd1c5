//! `vtol-core` — foundational types for the vtol fleet simulator.
//!
//! Every other `vtol-*` crate depends on this one.  It has no `vtol-*`
//! dependencies and minimal external ones (`rand`, `thiserror`, and optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`ids`]          | `VehicleId`, `VehicleTypeId`                          |
//! | [`time`]         | `Tick`, `SimClock`                                    |
//! | [`rng`]          | `VehicleRng` (per-vehicle), `SimRng` (global)         |
//! | [`fault`]        | `FaultModel` — the per-tick fault trial               |
//! | [`vehicle_type`] | `VehicleType`, `VehicleTypeTable`                     |
//! | [`config`]       | `SimConfig`, `TypeAssignment`                         |
//! | [`error`]        | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and type records. |

pub mod config;
pub mod error;
pub mod fault;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vehicle_type;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, TypeAssignment};
pub use error::{CoreError, CoreResult};
pub use fault::FaultModel;
pub use ids::{VehicleId, VehicleTypeId};
pub use rng::{SimRng, VehicleRng};
pub use time::{SimClock, Tick};
pub use vehicle_type::{VehicleType, VehicleTypeTable};
