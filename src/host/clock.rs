//! Fixed-interval tick scheduling.

use std::time::Duration;

/// Converts elapsed time into whole ticks at a fixed interval.
///
/// Leftover time carries over to the next call, so the tick count depends
/// only on total elapsed time, not on how it was split. Works the same
/// with a real clock or a simulated one.
#[derive(Clone, Debug)]
pub struct TickClock {
    interval: Duration,
    carry_nanos: u128,
}

impl TickClock {
    /// Create a clock. `interval` must be non-zero.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero(), "tick interval must be non-zero");
        Self {
            interval,
            carry_nanos: 0,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add `elapsed` and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        let interval = self.interval.as_nanos().max(1);
        let total = self.carry_nanos + elapsed.as_nanos();
        self.carry_nanos = total % interval;
        u64::try_from(total / interval).unwrap_or(u64::MAX)
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn until_next(&self) -> Duration {
        let remaining = self.interval.as_nanos().saturating_sub(self.carry_nanos);
        Duration::from_nanos(u64::try_from(remaining).unwrap_or(u64::MAX))
    }

    /// Drop any carried time.
    pub fn reset(&mut self) {
        self.carry_nanos = 0;
    }
}
