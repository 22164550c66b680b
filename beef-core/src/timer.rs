//! One-shot deadline timer checked against a monotonic clock.

use embassy_time::{Duration, Instant};

/// A deadline that is armed with a duration and later polled for expiry.
///
/// The timer never reads the clock itself: callers pass the current
/// [`Instant`] on every operation, which keeps it usable from tests and from
/// any poll loop regardless of how time is sourced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SustainTimer {
    #[default]
    Disarmed,
    Armed { deadline: Instant },
}

impl SustainTimer {
    #[must_use]
    pub const fn new() -> Self {
        SustainTimer::Disarmed
    }

    /// Arm (or re-arm) the timer to expire `duration` after `now`.
    ///
    /// Re-arming an armed timer pushes its deadline forward.
    #[inline]
    pub fn arm(&mut self, now: Instant, duration: Duration) {
        let deadline = now.checked_add(duration).unwrap_or(Instant::MAX);
        *self = SustainTimer::Armed { deadline };
    }

    #[inline]
    pub fn disarm(&mut self) {
        *self = SustainTimer::Disarmed;
    }

    #[inline]
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(self, SustainTimer::Armed { .. })
    }

    /// Returns `true` exactly once when an armed timer has reached its
    /// deadline, disarming it in the process.
    pub fn check_expired_reset(&mut self, now: Instant) -> bool {
        match *self {
            SustainTimer::Armed { deadline } if now >= deadline => {
                *self = SustainTimer::Disarmed;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_expires() {
        let mut timer = SustainTimer::new();
        assert!(!timer.check_expired_reset(Instant::from_millis(1_000_000)));
    }

    #[test]
    fn test_expires_once_at_deadline() {
        let mut timer = SustainTimer::new();
        timer.arm(Instant::from_millis(10), Duration::from_millis(100));

        assert!(!timer.check_expired_reset(Instant::from_millis(109)));
        assert!(timer.check_expired_reset(Instant::from_millis(110)));
        assert!(!timer.is_armed());
        assert!(!timer.check_expired_reset(Instant::from_millis(500)));
    }

    #[test]
    fn test_rearm_extends_deadline() {
        let mut timer = SustainTimer::new();
        timer.arm(Instant::from_millis(0), Duration::from_millis(100));
        timer.arm(Instant::from_millis(80), Duration::from_millis(100));

        assert!(!timer.check_expired_reset(Instant::from_millis(150)));
        assert!(timer.check_expired_reset(Instant::from_millis(180)));
    }
}
