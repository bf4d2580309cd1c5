//! `vtol-sim` — tick loop orchestrator for the vtol fleet simulator.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for each tick until the horizon:
//!   ⓪ Clock     — advance by the fixed increment.
//!   ① Tick      — for every vehicle whose `blocked` flag is clear, call
//!                 Vehicle::tick.  A charger released to a waiting vehicle is
//!                 handed over immediately, before the next vehicle ticks.
//!                 Blocked vehicles accrue one increment of wait time.
//!   ② Mark      — for every vehicle, set `blocked` from its current state.
//! ```
//!
//! A vehicle that starts waiting in phase ① of tick N is marked in phase ②
//! and skipped from tick N+1 on.  It only leaves the queue through a
//! hand-off, never through its own tick, so no vehicle is processed twice in
//! one tick.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | `run_replicates` runs independent sims on Rayon.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vtol_core::SimConfig;
//! use vtol_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::default();
//! let mut sim = SimBuilder::new(config.clone()).build()?;
//! sim.run_for(config.duration_hours, &mut NoopObserver)?;
//! for vehicle in sim.vehicles() {
//!     println!("{}: {:?}", vehicle.id(), vehicle.stats());
//! }
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use batch::run_replicates;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
