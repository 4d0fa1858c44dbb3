use std::thread;
use std::time::{Duration, Instant};

/// Monotonic time source used by the capture loop.
pub trait Clock {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration);
}

/// Real time: `Instant::now` and `thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-util"))]
mod manual {
    use std::time::{Duration, Instant};

    use parking_lot::Mutex;

    use super::Clock;

    /// Clock that only moves when told to. `sleep` advances it instantly.
    ///
    /// Records every requested sleep so tests can assert on the wait pattern.
    #[derive(Debug)]
    pub struct ManualClock {
        inner: Mutex<ManualClockState>,
    }

    #[derive(Debug)]
    struct ManualClockState {
        now: Instant,
        sleeps: Vec<Duration>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                inner: Mutex::new(ManualClockState {
                    now: Instant::now(),
                    sleeps: Vec::new(),
                }),
            }
        }

        pub fn advance(&self, duration: Duration) {
            self.inner.lock().now += duration;
        }

        pub fn sleeps(&self) -> Vec<Duration> {
            self.inner.lock().sleeps.clone()
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.inner.lock().now
        }

        fn sleep(&self, duration: Duration) {
            let mut state = self.inner.lock();
            state.now += duration;
            state.sleeps.push(duration);
        }
    }
}
