//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is measured in hours (`f64`).  The clock never accumulates
//! floating-point increments; it counts whole ticks and derives the timestamp:
//!
//!   now = origin_hr + tick * tick_hr
//!
//! so after 60 ticks of 0.05 h the clock reads `60.0 * 0.05`, not the sum of
//! sixty rounded additions.  `set_time` moves the origin and resets the
//! counter.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Ticks below one part in a million are treated as rounding noise when
/// converting a duration to a tick count.
const TICK_EPSILON: f64 = 1e-6;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A count of clock advances since the clock origin.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic simulated-time source advanced in fixed increments.
///
/// One clock is owned by each simulation; vehicles receive the timestamp as
/// an argument rather than holding a pointer to the clock.
#[derive(Clone, Debug, PartialEq)]
pub struct SimClock {
    origin_hr:    f64,
    tick_hr:      f64,
    current_tick: Tick,
}

impl SimClock {
    /// Create a clock reading `start_hr` that advances `tick_hr` per tick.
    ///
    /// Fails unless `tick_hr` is strictly positive and finite.
    pub fn new(start_hr: f64, tick_hr: f64) -> CoreResult<Self> {
        if !(tick_hr.is_finite() && tick_hr > 0.0) {
            return Err(CoreError::InvalidTickIncrement(tick_hr));
        }
        if !start_hr.is_finite() {
            return Err(CoreError::Config(format!("clock start {start_hr} is not finite")));
        }
        Ok(Self {
            origin_hr: start_hr,
            tick_hr,
            current_tick: Tick::ZERO,
        })
    }

    /// Advance the clock by one increment.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Current simulated timestamp in hours.
    #[inline]
    pub fn now(&self) -> f64 {
        self.origin_hr + self.current_tick.0 as f64 * self.tick_hr
    }

    /// Hours added by each call to [`advance`](Self::advance).
    #[inline]
    pub fn tick_hours(&self) -> f64 {
        self.tick_hr
    }

    /// Ticks advanced since construction or the last `set_time`.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Overwrite the current timestamp.
    ///
    /// Test/setup use only.  The simulation refuses to call this once a run
    /// has started.
    pub fn set_time(&mut self, timestamp_hr: f64) {
        self.origin_hr = timestamp_hr;
        self.current_tick = Tick::ZERO;
    }

    /// Number of ticks needed to cover `duration_hr`.
    ///
    /// Rounds up, except that a remainder below [`TICK_EPSILON`] of a tick is
    /// dropped: `3.0 / 0.05` is 60 rather than 61, and a horizon 1e-8 h past
    /// a 0.05 h boundary ends on that boundary.
    pub fn ticks_for_hours(&self, duration_hr: f64) -> u64 {
        if duration_hr <= 0.0 {
            return 0;
        }
        (duration_hr / self.tick_hr - TICK_EPSILON).ceil().max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} h)", self.current_tick, self.now())
    }
}
