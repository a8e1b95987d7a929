//! Motion curves that end in a requested velocity.
//!
//! The path runs along the straight line from `start` to `end`. Its last
//! stretch (the tail, at most [`VELOCITY_HORIZON_MILLIS`] long) moves at the
//! requested speed. Before the tail a quadratic eases from the start to the
//! point where the tail begins. The quadratic's end slope is the requested
//! speed whenever the remaining distance allows it, so the path never moves
//! backward and never overshoots `end`.

use crate::error::{require, InjectionError, Result};
use crate::input_constants::{
    DEFAULT_SWIPE_DURATION_MILLIS, MAX_DEFAULT_VELOCITY_SWIPE_DURATION_MILLIS,
    VELOCITY_HORIZON_MILLIS,
};
use cranpose_ui_graphics::Point;

/// Slack for float error in the feasibility check, in pixels.
const DISTANCE_EPSILON: f32 = 1e-3;

/// Shortest duration at which a velocity swipe yields at least three events.
pub fn minimum_velocity_swipe_duration(event_period_millis: i64) -> i64 {
    (2.5 * event_period_millis as f64).ceil() as i64
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityPathFinder {
    start: Point,
    end: Point,
    /// Unit vector from start to end, zero when they coincide.
    direction: Point,
    duration_millis: i64,
    /// Requested end speed in px/ms.
    speed: f32,
    /// Time at which the constant speed tail begins.
    tail_start: f32,
    /// Distance covered when the tail begins.
    tail_start_distance: f32,
    a: f32,
    b: f32,
}

impl VelocityPathFinder {
    /// `end_velocity` is in px/s.
    pub fn new(start: Point, end: Point, end_velocity: f32, duration_millis: i64) -> Result<Self> {
        require(end_velocity >= 0.0 && end_velocity.is_finite(), || {
            format!("Velocity cannot be {end_velocity}, it must be positive")
        })?;
        require(duration_millis >= 1, || {
            format!("duration must be at least 1 millisecond, not {duration_millis}")
        })?;

        let delta = end - start;
        let distance = delta.distance();
        let speed = end_velocity / 1000.0;
        let duration = duration_millis as f32;
        let tail = (VELOCITY_HORIZON_MILLIS as f32).min(duration / 2.0);
        let tail_distance = speed * tail;

        if distance + DISTANCE_EPSILON < tail_distance {
            return Err(Self::infeasible(
                distance,
                end_velocity,
                duration_millis,
                tail,
            ));
        }

        let tail_start = duration - tail;
        let tail_start_distance = (distance - tail_distance).max(0.0);
        let average_speed = 2.0 * tail_start_distance / tail_start;
        let junction_speed = speed.min(average_speed);
        let b = average_speed - junction_speed;
        let a = (junction_speed - b) / (2.0 * tail_start);

        let direction = if distance > 0.0 {
            delta / distance
        } else {
            Point::ZERO
        };

        Ok(Self {
            start,
            end,
            direction,
            duration_millis,
            speed,
            tail_start,
            tail_start_distance,
            a,
            b,
        })
    }

    fn infeasible(
        distance: f32,
        end_velocity: f32,
        duration_millis: i64,
        tail: f32,
    ) -> InjectionError {
        let speed = end_velocity / 1000.0;
        let max_velocity = distance / tail * 1000.0;
        let min_distance = speed * tail;
        let mut suggestions = vec![format!("decrease the velocity to at most {max_velocity}px/s")];
        let max_duration = (2.0 * distance / speed).floor() as i64;
        if max_duration >= 1 {
            suggestions.push(format!(
                "decrease the duration to at most {max_duration}ms"
            ));
        }
        suggestions.push(format!(
            "increase the distance to at least {min_distance}px"
        ));
        InjectionError::IllegalArgument(format!(
            "Cannot swipe {distance}px in {duration_millis}ms and end with a velocity of \
             {end_velocity}px/s; {}",
            suggestions.join(", or ")
        ))
    }

    /// Shortest duration whose path never exceeds `end_velocity`, bounded to
    /// what a swipe can express at `event_period_millis`.
    pub fn default_duration(
        start: Point,
        end: Point,
        end_velocity: f32,
        event_period_millis: i64,
    ) -> i64 {
        if end_velocity <= 0.0 || !end_velocity.is_finite() {
            return DEFAULT_SWIPE_DURATION_MILLIS;
        }
        let distance = (end - start).distance();
        let duration = (distance / end_velocity * 1000.0).round() as i64;
        duration.clamp(
            minimum_velocity_swipe_duration(event_period_millis),
            MAX_DEFAULT_VELOCITY_SWIPE_DURATION_MILLIS,
        )
    }

    pub fn duration_millis(&self) -> i64 {
        self.duration_millis
    }

    /// Distance travelled along the path at `time_millis`.
    fn travelled(&self, time: f32) -> f32 {
        if time <= self.tail_start {
            self.a * time * time + self.b * time
        } else {
            self.tail_start_distance + self.speed * (time - self.tail_start)
        }
    }

    pub fn position_at(&self, time_millis: i64) -> Point {
        if time_millis <= 0 {
            return self.start;
        }
        if time_millis >= self.duration_millis {
            return self.end;
        }
        self.start + self.direction * self.travelled(time_millis as f32)
    }
}

#[cfg(test)]
#[path = "tests/velocity_path_tests.rs"]
mod tests;
