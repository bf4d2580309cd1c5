//! `vtol-fleet` — the per-vehicle flight/charge state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`state`]   | `VehicleState`, `VehicleStats`, `StateCounts`              |
//! | [`vehicle`] | `Vehicle` (the FSM), `LegEvent`                            |
//! | [`rngs`]    | `VehicleRngs` (per-vehicle fault RNG, stored beside the fleet) |
//! | [`error`]   | `FleetError`, `FleetResult`                                |
//!
//! # State machine
//!
//! ```text
//!            leg end, station free
//!   InFlight ─────────────────────────────▶ Charging
//!      │  ▲                                    │
//!      │  └──────────── charge end ────────────┘
//!      │ leg end, no station              ▲
//!      ▼                                  │ hand-off from ChargerPool::release
//!   WaitingToCharge ──────────────────────┘
//! ```
//!
//! `Vehicle::tick` is only defined for `InFlight` and `Charging`.  A waiting
//! vehicle leaves `WaitingToCharge` only through
//! [`Vehicle::accept_handoff`].

pub mod error;
pub mod rngs;
pub mod state;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use error::{FleetError, FleetResult};
pub use rngs::VehicleRngs;
pub use state::{StateCounts, VehicleState, VehicleStats};
pub use vehicle::{LegEvent, Vehicle};
