use std::time::Duration;

/// How the capture loop waits out the rest of an interval.
///
/// The loop never spins: it sleeps for the remaining time minus `margin`
/// to avoid oversleeping the deadline, then re-checks. Once the remainder
/// is at or below `margin + min_sleep` it sleeps the exact remainder. No
/// single sleep is longer than `max_sleep`, which bounds how long a stop
/// request waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePolicy {
    pub interval: Duration,
    pub margin: Duration,
    pub min_sleep: Duration,
    pub max_sleep: Duration,
}

impl SchedulePolicy {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            margin: Duration::from_millis(1),
            min_sleep: Duration::from_millis(5),
            max_sleep: Duration::from_millis(100),
        }
    }

    /// Time left in the interval after `elapsed`, `None` once it is over.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.interval.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    /// Duration of the next sleep given the time left in the interval.
    ///
    /// Never zero for a non-zero `remaining`: the margin is only taken off
    /// when at least `min_sleep` is left afterwards, and a zero `max_sleep`
    /// disables the cap.
    pub fn sleep_for(&self, remaining: Duration) -> Duration {
        let sleep = if remaining > self.margin.saturating_add(self.min_sleep) {
            remaining - self.margin
        } else {
            remaining
        };
        if self.max_sleep.is_zero() {
            sleep
        } else {
            sleep.min(self.max_sleep)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn remaining_until_interval_elapses() {
        let policy = SchedulePolicy::new(ms(100));
        assert_eq!(policy.remaining(ms(0)), Some(ms(100)));
        assert_eq!(policy.remaining(ms(60)), Some(ms(40)));
        assert_eq!(policy.remaining(ms(100)), None);
        assert_eq!(policy.remaining(ms(250)), None);
    }

    #[test]
    fn long_waits_leave_a_margin() {
        let policy = SchedulePolicy::new(ms(100));
        assert_eq!(policy.sleep_for(ms(40)), ms(39));
    }

    #[test]
    fn short_waits_sleep_exactly() {
        let policy = SchedulePolicy::new(ms(100));
        assert_eq!(policy.sleep_for(ms(5)), ms(5));
        assert_eq!(policy.sleep_for(ms(1)), ms(1));
    }

    #[test]
    fn margin_never_eats_the_whole_wait() {
        let policy = SchedulePolicy {
            margin: ms(10),
            ..SchedulePolicy::new(ms(100))
        };
        assert_eq!(policy.sleep_for(ms(8)), ms(8));
        assert_eq!(policy.sleep_for(ms(15)), ms(15));
        assert_eq!(policy.sleep_for(ms(16)), ms(6));
    }

    #[test]
    fn zero_cap_does_not_spin() {
        let policy = SchedulePolicy {
            max_sleep: Duration::ZERO,
            ..SchedulePolicy::new(ms(100))
        };
        assert_eq!(policy.sleep_for(ms(40)), ms(39));
    }

    #[test]
    fn sleeps_are_capped() {
        let policy = SchedulePolicy::new(Duration::from_secs(60));
        assert_eq!(policy.sleep_for(Duration::from_secs(60)), ms(100));
    }
}
