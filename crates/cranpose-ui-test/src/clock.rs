//! Virtual event time.

use crate::error::{require, InjectionError, Result};

/// Monotonic virtual timeline every synthesized event is stamped against.
///
/// Starts at 0 for each dispatcher and only moves forward by non-negative
/// deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventClock {
    current_time: i64,
}

impl EventClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    /// Time `delta_millis` from now. Fails for negative deltas and for
    /// deltas that would overflow the timeline.
    pub fn time_after(&self, delta_millis: i64) -> Result<i64> {
        require(delta_millis >= 0, || {
            format!("duration of a delay can only be positive, not {delta_millis}")
        })?;
        self.current_time.checked_add(delta_millis).ok_or_else(|| {
            InjectionError::IllegalArgument(format!(
                "delay of {delta_millis}ms overflows the event time {}",
                self.current_time
            ))
        })
    }

    /// Moves the clock forward by `delta_millis` and returns the new time.
    pub fn advance(&mut self, delta_millis: i64) -> Result<i64> {
        let time = self.time_after(delta_millis)?;
        self.current_time = time;
        Ok(time)
    }

    /// Jumps to `time`, which must not be in the past.
    pub(crate) fn advance_to(&mut self, time: i64) {
        debug_assert!(time >= self.current_time, "event clock cannot go back");
        self.current_time = self.current_time.max(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(EventClock::new().current_time(), 0);
    }

    #[test]
    fn advance_accumulates() {
        let mut clock = EventClock::new();
        assert_eq!(clock.advance(10), Ok(10));
        assert_eq!(clock.advance(0), Ok(10));
        assert_eq!(clock.advance(7), Ok(17));
        assert_eq!(clock.current_time(), 17);
    }

    #[test]
    fn negative_delta_is_rejected_without_moving() {
        let mut clock = EventClock::new();
        clock.advance(5).unwrap();
        let error = clock.advance(-1).unwrap_err();
        assert!(error.is_illegal_argument());
        assert_eq!(clock.current_time(), 5);
    }

    #[test]
    fn overflowing_delta_is_rejected_without_moving() {
        let mut clock = EventClock::new();
        clock.advance(i64::MAX).unwrap();
        let error = clock.advance(1).unwrap_err();
        assert!(error.is_illegal_argument());
        assert!(error.message().contains("overflows"), "{error}");
        assert_eq!(clock.current_time(), i64::MAX);
        assert_eq!(clock.advance(0), Ok(i64::MAX));
    }
}
