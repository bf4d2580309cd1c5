//! `vtol-charger` — the shared charging-station pool.
//!
//! [`ChargerPool`] is a counting semaphore with a FIFO wait queue.  It never
//! blocks: a failed [`try_acquire`](ChargerPool::try_acquire) enqueues the
//! caller and reports failure, and [`release`](ChargerPool::release) either
//! frees a station or names the head-of-queue vehicle that should start
//! charging at the release timestamp.
//!
//! The queue holds [`VehicleId`](vtol_core::VehicleId) handles, never the
//! vehicles themselves; the simulation owns the fleet and applies hand-offs.

pub mod error;
pub mod pool;


pub use error::{ChargerError, ChargerResult};
pub use pool::{ChargerPool, Release};
