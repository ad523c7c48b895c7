//! Monotonic time source for the tick loop.
//!
//! The core itself never reads a clock — every operation takes `now` as a
//! parameter. Drivers use [`GameClock`] to produce those timestamps, which
//! keeps tests free to use literal values.

use crate::types::Millis;
use std::time::Instant;

/// Reference cadence of the tick loop. Drivers may miss ticks; the engine
/// accrues by actual elapsed time, not by counting periods.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Milliseconds since an arbitrary origin, backed by `Instant` so the
/// timeline never jumps backwards with wall-clock adjustments.
#[derive(Debug, Clone)]
pub struct GameClock {
    origin: Instant,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}
