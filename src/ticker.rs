use std::time::{Duration, Instant};

/// Default UI refresh interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Countdown cadence: one decrement per second
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Get UI refresh duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// A periodic, deadline-based tick source.
///
/// There is no background thread: the owner polls it with the current instant and it
/// reports whether a period has elapsed. Dropping the handle cancels it.
#[derive(Debug)]
pub struct TickHandle {
    next_due: Instant,
    period: Duration,
}

impl TickHandle {
    /// Arm a new source whose first tick is due one period after `now`
    pub fn arm(now: Instant, period: Duration) -> Self {
        Self {
            next_due: now + period,
            period,
        }
    }

    /// Time left until the next tick is due (zero if overdue)
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Consume one due period. Returns false if the next tick is still in the future.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        true
    }
}
