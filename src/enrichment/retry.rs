//! Rate-limit retry policy.
//!
//! Only [`SourceError::RateLimited`] is retried. Every other failure is
//! returned on the first attempt so the caller can fall back to another
//! source immediately.

use super::traits::SourceError;
use std::time::{Duration, Instant};

/// Default wait between rate-limited attempts.
pub const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(30);

/// Monotonic time source used for retry delays.
pub trait Clock {
    /// Current monotonic instant.
    fn now(&self) -> Instant;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Fixed-interval retry on rate-limit signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait between attempts
    pub interval: Duration,
    /// Maximum number of retries after the first attempt (`None` = unbounded)
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_RATE_LIMIT_WAIT,
            max_retries: None,
        }
    }
}

/// Result of running an operation under a [`RetryPolicy`].
#[derive(Debug)]
pub struct RetryOutcome<T> {
    /// Final result of the last attempt
    pub result: Result<T, SourceError>,
    /// Number of rate-limit waits performed
    pub waits: usize,
}

impl RetryPolicy {
    /// Create a policy with the given interval and cap.
    #[must_use]
    pub const fn new(interval: Duration, max_retries: Option<u32>) -> Self {
        Self {
            interval,
            max_retries,
        }
    }

    /// Run `attempt` until it returns something other than `RateLimited`,
    /// waiting `interval` between attempts.
    ///
    /// When the cap is reached the last `RateLimited` error is returned.
    pub fn run<T>(
        &self,
        clock: &dyn Clock,
        mut attempt: impl FnMut() -> Result<T, SourceError>,
    ) -> RetryOutcome<T> {
        let mut waits = 0usize;

        loop {
            let result = attempt();
            if !matches!(result, Err(SourceError::RateLimited)) {
                return RetryOutcome { result, waits };
            }

            if self
                .max_retries
                .is_some_and(|max| waits >= max as usize)
            {
                tracing::warn!("Rate-limit retry cap of {} reached", waits);
                return RetryOutcome { result, waits };
            }

            tracing::info!(
                "Rate limit reached, waiting {} seconds before retrying",
                self.interval.as_secs()
            );
            self.wait(clock);
            waits += 1;
        }
    }

    /// Sleep until `interval` has elapsed on the monotonic clock.
    fn wait(&self, clock: &dyn Clock) {
        let Some(deadline) = clock.now().checked_add(self.interval) else {
            // Interval not representable as an instant
            clock.sleep(self.interval);
            return;
        };
        loop {
            let remaining = deadline.saturating_duration_since(clock.now());
            if remaining.is_zero() {
                break;
            }
            clock.sleep(remaining);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use std::cell::{Cell, RefCell};
    use std::time::{Duration, Instant};

    /// Clock that advances only when slept on.
    pub struct FakeClock {
        start: Instant,
        elapsed: Cell<Duration>,
        pub sleeps: RefCell<Vec<Duration>>,
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self {
                start: Instant::now(),
                elapsed: Cell::new(Duration::ZERO),
                sleeps: RefCell::new(Vec::new()),
            }
        }

        pub fn total_slept(&self) -> Duration {
            self.elapsed.get()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.start + self.elapsed.get()
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
            self.elapsed.set(self.elapsed.get() + duration);
        }
    }
}
