//! Counting semaphore + FIFO wait queue over the charging stations.

use std::collections::VecDeque;

use tracing::trace;
use vtol_core::VehicleId;

use crate::{ChargerError, ChargerResult};

/// Outcome of [`ChargerPool::release`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Release {
    /// Nobody was waiting; the free count went up by one.
    Freed,
    /// The station passed straight to `vehicle`, which must start charging
    /// at `at`.  The free count is unchanged.
    HandedOff { vehicle: VehicleId, at: f64 },
}

/// Shared pool of charging stations.
///
/// # Invariants
///
/// - `0 <= free <= total`.
/// - A vehicle appears in the wait queue at most once.
/// - Stations are only handed off, never counted, while the queue is
///   non-empty, so `free + stations in use == total` at all times.
#[derive(Clone, Debug)]
pub struct ChargerPool {
    total:      usize,
    free:       usize,
    wait_queue: VecDeque<VehicleId>,
}

impl ChargerPool {
    /// A pool with `total` stations, all free.  Zero stations is allowed:
    /// every request then waits forever.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            free: total,
            wait_queue: VecDeque::new(),
        }
    }

    /// Take a station if one is free.
    ///
    /// On `Ok(false)` the vehicle has been appended to the tail of the wait
    /// queue and the caller must put it in its waiting state.
    pub fn try_acquire(&mut self, vehicle: VehicleId) -> ChargerResult<bool> {
        if self.free > 0 {
            self.free -= 1;
            return Ok(true);
        }
        if self.is_queued(vehicle) {
            return Err(ChargerError::AlreadyQueued(vehicle));
        }
        self.wait_queue.push_back(vehicle);
        trace!(%vehicle, queue_len = self.wait_queue.len(), "queued for charger");
        Ok(false)
    }

    /// Give back one station at `timestamp`.
    ///
    /// With an empty queue the station becomes free.  Otherwise the longest
    /// waiting vehicle is popped and returned in [`Release::HandedOff`].
    pub fn release(&mut self, timestamp: f64) -> ChargerResult<Release> {
        match self.wait_queue.pop_front() {
            Some(vehicle) => {
                trace!(%vehicle, at = timestamp, "charger handed off");
                Ok(Release::HandedOff { vehicle, at: timestamp })
            }
            None => {
                if self.free >= self.total {
                    return Err(ChargerError::OverRelease { total: self.total });
                }
                self.free += 1;
                Ok(Release::Freed)
            }
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Stations not currently assigned to a vehicle.
    pub fn free(&self) -> usize {
        self.free
    }

    /// Stations currently assigned to a vehicle.
    pub fn in_use(&self) -> usize {
        self.total - self.free
    }

    pub fn queue_len(&self) -> usize {
        self.wait_queue.len()
    }

    pub fn is_queued(&self, vehicle: VehicleId) -> bool {
        self.wait_queue.contains(&vehicle)
    }

    /// Waiting vehicles, head of the queue first.
    pub fn waiting(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.wait_queue.iter().copied()
    }
}
