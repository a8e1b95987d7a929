//! Time sampling for synthesized gestures.
//!
//! These functions are pure: they decide *when* samples are taken, the
//! injection scopes decide what happens at each sample.

use crate::error::{require, Result};
use cranpose_ui_graphics::lerp_f32;

/// Rounds half away from zero, the way step counts and sample times are
/// rounded throughout gesture synthesis. Ties therefore favour more events.
pub fn round_half_up(value: f64) -> i64 {
    value.round() as i64
}

/// Linear interpolation between two timestamps, rounded to the nearest
/// millisecond.
pub fn lerp_time(start: i64, end: i64, fraction: f32) -> i64 {
    start + round_half_up((end - start) as f64 * fraction as f64)
}

/// Number of samples needed to cover `span` millis at `event_period`.
pub fn step_count(span: i64, event_period: i64) -> usize {
    let steps = round_half_up(span as f64 / event_period.max(1) as f64);
    steps.max(1) as usize
}

/// Evenly spaced sample times in `(t0, t1]`, as close to `event_period`
/// apart as possible. The last sample is exactly `t1`.
pub fn segment_times(t0: i64, t1: i64, event_period: i64) -> Vec<i64> {
    let steps = step_count(t1 - t0, event_period);
    (1..=steps)
        .map(|step| lerp_time(t0, t1, step as f32 / steps as f32))
        .collect()
}

/// Validates a gesture duration and its key times.
pub fn validate_key_times(duration_millis: i64, key_times: &[i64]) -> Result<()> {
    require(duration_millis >= 1, || {
        format!("duration must be at least 1 millisecond, not {duration_millis}")
    })?;
    require(
        key_times.iter().all(|time| (0..=duration_millis).contains(time)),
        || format!("keyTimes contains timestamps out of range [0..{duration_millis}]: {key_times:?}"),
    )?;
    require(key_times.windows(2).all(|pair| pair[0] <= pair[1]), || {
        format!("keyTimes must be sorted: {key_times:?}")
    })
}

/// Sample times of a swipe lasting `duration_millis`.
///
/// Every key time is sampled exactly; between key times samples are spaced
/// as close to `event_period` as possible. Times are relative to the start
/// of the gesture, which itself is not part of the result.
pub fn swipe_times(duration_millis: i64, key_times: &[i64], event_period: i64) -> Result<Vec<i64>> {
    validate_key_times(duration_millis, key_times)?;

    let mut times = Vec::new();
    let mut current = 0;
    let mut key = 0;
    while current < duration_millis {
        while key < key_times.len() && key_times[key] <= current {
            key += 1;
        }
        let next = key_times.get(key).copied().unwrap_or(duration_millis);
        times.extend(segment_times(current, next, event_period));
        current = next;
    }
    Ok(times)
}

/// One step of a smooth scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollStep {
    /// Time since the previous step.
    pub delay_millis: i64,
    pub delta: f32,
}

/// Splits `amount` into steps spread over `duration_millis`.
///
/// Each delta is the difference of two cumulative interpolations, so the
/// deltas add up to `amount` without drift.
pub fn scroll_steps(amount: f32, duration_millis: i64, event_period: i64) -> Vec<ScrollStep> {
    let steps = step_count(duration_millis, event_period);
    let mut previous_time = 0;
    let mut previous_value = 0.0;
    (1..=steps)
        .map(|step| {
            let progress = step as f32 / steps as f32;
            let time = lerp_time(0, duration_millis, progress);
            let value = lerp_f32(0.0, amount, progress);
            let scroll_step = ScrollStep {
                delay_millis: time - previous_time,
                delta: value - previous_value,
            };
            previous_time = time;
            previous_value = value;
            scroll_step
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/synth_tests.rs"]
mod tests;
