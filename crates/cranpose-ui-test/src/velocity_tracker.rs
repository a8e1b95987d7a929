//! Velocity estimation over injected events.
//!
//! Reads synthesized events the way a platform fling detector does, using the
//! impulse strategy: the velocity is derived from the kinetic energy that the
//! recent samples impart. Tests use it to check that a velocity swipe is
//! perceived at the velocity it asked for.

use crate::event::{EventAction, PointerId, PrimitiveEvent};
use crate::input_constants::VELOCITY_HORIZON_MILLIS;
use cranpose_ui_graphics::Point;
use std::collections::VecDeque;

const HISTORY_SIZE: usize = 20;

/// Samples further apart than this mean the pointer had stopped.
pub const ASSUME_STOPPED_MILLIS: i64 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    time: i64,
    value: f32,
}

/// One-axis impulse velocity tracker over absolute positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker1D {
    samples: VecDeque<Sample>,
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_data_point(&mut self, time_millis: i64, value: f32) {
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample {
            time: time_millis,
            value,
        });
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Velocity in units per second; 0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples.back().copied() else {
            return 0.0;
        };

        // Newest first, only samples inside the horizon and not separated
        // from the newest one by a stop.
        let recent: Vec<Sample> = self
            .samples
            .iter()
            .rev()
            .take_while(|sample| {
                let age = newest.time - sample.time;
                age <= VELOCITY_HORIZON_MILLIS && age <= ASSUME_STOPPED_MILLIS
            })
            .copied()
            .collect();
        if recent.len() < 2 {
            return 0.0;
        }

        let mut work = 0.0f32;
        // Oldest pair first.
        for (index, pair) in recent.windows(2).rev().enumerate() {
            let (newer, older) = (pair[0], pair[1]);
            if newer.time == older.time {
                continue;
            }
            let current = (newer.value - older.value) / (newer.time - older.time) as f32;
            let previous = kinetic_energy_to_velocity(work);
            work += (current - previous) * current.abs();
            if index == 0 {
                work *= 0.5;
            }
        }
        kinetic_energy_to_velocity(work) * 1000.0
    }

    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }
}

fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Two-axis tracker.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_millis: i64, position: Point) {
        self.x.add_data_point(time_millis, position.x);
        self.y.add_data_point(time_millis, position.y);
    }

    /// Feeds the positions of pointer `id` from down and move events,
    /// historical samples included.
    pub fn add_events<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a PrimitiveEvent>,
        id: PointerId,
    ) {
        for event in events {
            if !matches!(
                event.action,
                EventAction::Down | EventAction::PointerDown | EventAction::Move
            ) {
                continue;
            }
            let Some(index) = event.pointers.iter().position(|pointer| pointer.id == id) else {
                continue;
            };
            for sample in &event.history {
                if let Some(position) = sample.positions.get(index) {
                    self.add_position(sample.event_time, *position);
                }
            }
            self.add_position(event.event_time, event.pointers[index].position);
        }
    }

    /// Velocity in px/s.
    pub fn calculate_velocity(&self) -> Point {
        Point::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }

    /// Velocity in px/s with each axis clamped to `max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> Point {
        Point::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_sample_are_zero() {
        let mut tracker = VelocityTracker1D::new();
        assert_eq!(tracker.calculate_velocity(), 0.0);
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn constant_velocity_is_exact() {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..=6 {
            tracker.add_data_point(step * 16, step as f32 * 16.0);
        }
        let velocity = tracker.calculate_velocity();
        assert!((velocity - 1000.0).abs() < 1.0, "got {velocity}");
    }

    #[test]
    fn backward_motion_is_negative() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);
        assert!(tracker.calculate_velocity() < 0.0);
    }

    #[test]
    fn stop_gap_resets_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(ASSUME_STOPPED_MILLIS + 1, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn velocity_is_capped() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(1, 10_000.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), 8_000.0);
        tracker.reset();
        tracker.add_data_point(0, 10_000.0);
        tracker.add_data_point(1, 0.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), -8_000.0);
    }

    #[test]
    fn two_axis_tracker() {
        let mut tracker = VelocityTracker::new();
        for step in 0..4 {
            let t = step * 10;
            tracker.add_position(t, Point::new(t as f32 * 2.0, -(t as f32)));
        }
        let velocity = tracker.calculate_velocity();
        assert!((velocity.x - 2000.0).abs() < 1.0);
        assert!((velocity.y + 1000.0).abs() < 1.0);
    }

    #[test]
    fn two_axis_velocity_is_capped_per_axis() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::ZERO);
        tracker.add_position(1, Point::new(10_000.0, 1.0));
        let velocity = tracker.calculate_velocity_with_max(8_000.0);
        assert_eq!(velocity.x, 8_000.0);
        assert!(velocity.y > 0.0 && velocity.y < 8_000.0);
    }
}
