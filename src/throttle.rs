//! Fixed-interval pacing between artist lookups.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

const MIN_POLL_STEP: Duration = Duration::from_millis(1);

/// Blocks the caller so consecutive artists stay at least one interval apart.
pub struct Throttle {
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    clock: DefaultClock,
    interval: Duration,
}

impl Throttle {
    /// A zero interval yields a throttle that never waits.
    pub fn new(interval: Duration) -> Self {
        let limiter = Quota::with_period(interval)
            .map(|quota| RateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)));
        Self {
            limiter,
            clock: DefaultClock::default(),
            interval,
        }
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    /// Takes the current slot without blocking, so the next `wait` lasts a full interval.
    pub fn start(&self) {
        if let Some(limiter) = &self.limiter {
            let _ = limiter.check();
        }
    }

    /// Waits until the next slot is free, then consumes it.
    pub fn wait(&self) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        while let Err(not_until) = limiter.check() {
            let wait = not_until
                .wait_time_from(self.clock.now())
                .clamp(MIN_POLL_STEP, self.interval.max(MIN_POLL_STEP));
            std::thread::sleep(wait);
        }
    }
}
