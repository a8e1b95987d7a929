use super::InjectionScope;
use crate::coordinates::CoordinateMapper;
use crate::dispatcher::InputDispatcher;
use crate::error::{require, InjectionError, Result};
use crate::event::PointerId;
use crate::input_constants::MAX_VELOCITY_EVENT_PERIOD_MILLIS;
use crate::synth::swipe_times;
use crate::velocity_path::{minimum_velocity_swipe_duration, VelocityPathFinder};
use cranpose_ui_graphics::{lerp, Point};

/// Touch gestures on one node.
///
/// Pointer ids are chosen by the test. Single pointer gestures use id 0 and
/// multi touch gestures use ids `0..n`.
pub struct TouchInjectionScope<'a> {
    dispatcher: &'a mut InputDispatcher,
    mapper: &'a dyn CoordinateMapper,
}

impl_injection_scope!(TouchInjectionScope);

impl<'a> TouchInjectionScope<'a> {
    pub fn new(dispatcher: &'a mut InputDispatcher, mapper: &'a dyn CoordinateMapper) -> Self {
        Self { dispatcher, mapper }
    }

    /// Local position of pointer `id`, or `None` when it is not down.
    pub fn current_position(&self, id: PointerId) -> Option<Point> {
        self.dispatcher
            .current_touch_position(id)
            .map(|position| self.root_to_local(position))
    }

    fn active_position(&self, id: PointerId, event: &str) -> Result<Point> {
        self.dispatcher.check_touch_in_progress(event)?;
        self.current_position(id).ok_or_else(|| {
            InjectionError::IllegalArgument(format!(
                "Cannot send {event} event for pointer {id}, it is not active in the current gesture"
            ))
        })
    }

    /// Puts pointer `id` down at `position`.
    pub fn down(&mut self, id: PointerId, position: Point) -> Result<()> {
        let position = self.local_to_root(position);
        self.dispatcher.enqueue_touch_down(id, position)
    }

    /// Moves pointer `id` to `position` and sends a move `delay_millis` after
    /// the previous event.
    pub fn move_to(&mut self, id: PointerId, position: Point, delay_millis: i64) -> Result<()> {
        self.dispatcher.check_touch_in_progress("MOVE")?;
        self.dispatcher.check_delay(delay_millis)?;
        self.update_pointer_to(id, position)?;
        self.move_pointers(delay_millis)
    }

    pub fn move_by(&mut self, id: PointerId, delta: Point, delay_millis: i64) -> Result<()> {
        let current = self.active_position(id, "MOVE")?;
        self.move_to(id, current + delta, delay_millis)
    }

    /// Moves pointer `id` without sending an event. Use it to move several
    /// pointers in one event.
    pub fn update_pointer_to(&mut self, id: PointerId, position: Point) -> Result<()> {
        let position = self.local_to_root(position);
        self.dispatcher.update_touch_pointer(id, position)
    }

    pub fn update_pointer_by(&mut self, id: PointerId, delta: Point) -> Result<()> {
        let current = self.active_position(id, "MOVE")?;
        self.update_pointer_to(id, current + delta)
    }

    /// Sends a move with the current position of every pointer.
    pub fn move_pointers(&mut self, delay_millis: i64) -> Result<()> {
        self.dispatcher.check_touch_in_progress("MOVE")?;
        self.advance_event_time(delay_millis)?;
        self.dispatcher.enqueue_touch_move()
    }

    /// Sends a move whose history holds earlier samples.
    ///
    /// `relative_times` are negative offsets from the move, no earlier than
    /// `-delay_millis`. `coordinates` has one list per pointer in ascending id
    /// order, each as long as `relative_times`.
    pub fn move_with_history_multi_pointer(
        &mut self,
        relative_times: &[i64],
        coordinates: &[Vec<Point>],
        delay_millis: i64,
    ) -> Result<()> {
        for (index, relative) in relative_times.iter().enumerate() {
            require(*relative < 0, || {
                format!(
                    "Relative historical times should be negative, in order to be in the past \
                     (offset {index} was: {relative})"
                )
            })?;
            require(*relative >= -delay_millis, || {
                format!(
                    "Relative historical times should not be earlier than the previous event \
                     (offset {index} was: {relative}, {})",
                    -delay_millis
                )
            })?;
        }
        self.dispatcher.check_touch_in_progress("MOVE")?;
        self.dispatcher
            .check_history_shape(relative_times, coordinates)?;

        let coordinates: Vec<Vec<Point>> = coordinates
            .iter()
            .map(|pointer| {
                pointer
                    .iter()
                    .map(|position| self.local_to_root(*position))
                    .collect()
            })
            .collect();
        self.advance_event_time(delay_millis)?;
        self.dispatcher
            .enqueue_touch_moves(relative_times, &coordinates)
    }

    pub fn move_with_history(
        &mut self,
        relative_times: &[i64],
        coordinates: &[Point],
        delay_millis: i64,
    ) -> Result<()> {
        self.move_with_history_multi_pointer(relative_times, &[coordinates.to_vec()], delay_millis)
    }

    pub fn up(&mut self, id: PointerId) -> Result<()> {
        self.dispatcher.enqueue_touch_up(id)
    }

    /// Cancels the gesture `delay_millis` after the previous event.
    pub fn cancel(&mut self, delay_millis: i64) -> Result<()> {
        self.dispatcher.check_touch_in_progress("CANCEL")?;
        self.advance_event_time(delay_millis)?;
        self.dispatcher.enqueue_touch_cancel()
    }

    // Gestures

    /// Down, a move one event period later, up.
    pub fn click(&mut self, position: Point) -> Result<()> {
        self.dispatcher.check_touch_pointers_free([0])?;
        let period = self.event_period_millis();
        self.down(0, position)?;
        self.move_pointers(period)?;
        self.up(0)
    }

    /// Long click held for the long press timeout plus 100ms.
    pub fn long_click(&mut self, position: Point) -> Result<()> {
        let duration = self.view_configuration().default_long_click_duration_millis();
        self.long_click_with_duration(position, duration)
    }

    pub fn long_click_with_duration(&mut self, position: Point, duration_millis: i64) -> Result<()> {
        let timeout = self.view_configuration().long_press_timeout_millis;
        require(duration_millis >= timeout, || {
            format!("Long click must have a duration of at least {timeout}ms")
        })?;
        self.swipe(position, position, duration_millis)
    }

    /// Two clicks with the midpoint of the double tap window between them.
    pub fn double_click(&mut self, position: Point) -> Result<()> {
        let delay = self.view_configuration().default_double_tap_delay_millis();
        self.double_click_with_delay(position, delay)
    }

    /// Two clicks `delay_millis` apart, measured from the first up to the
    /// second down.
    pub fn double_click_with_delay(&mut self, position: Point, delay_millis: i64) -> Result<()> {
        let view = self.view_configuration();
        require(delay_millis >= view.double_tap_min_time_millis, || {
            format!(
                "Time between clicks in double click must be at least {}ms",
                view.double_tap_min_time_millis
            )
        })?;
        require(delay_millis < view.double_tap_timeout_millis, || {
            format!(
                "Time between clicks in double click must be smaller than {}ms",
                view.double_tap_timeout_millis
            )
        })?;
        self.click(position)?;
        self.advance_event_time(delay_millis)?;
        self.click(position)
    }

    /// Linear swipe from `start` to `end`.
    pub fn swipe(&mut self, start: Point, end: Point, duration_millis: i64) -> Result<()> {
        let duration = duration_millis as f32;
        self.swipe_along(
            |time| lerp(start, end, time as f32 / duration),
            duration_millis,
            &[],
        )
    }

    /// Swipe following `curve` from 0 to `duration_millis`. A move is sampled
    /// at every key time.
    pub fn swipe_along(
        &mut self,
        curve: impl Fn(i64) -> Point,
        duration_millis: i64,
        key_times: &[i64],
    ) -> Result<()> {
        self.multi_touch_swipe(&[&curve], duration_millis, key_times)
    }

    /// Pointer `i` follows `curves[i]`. All pointers go down at the start,
    /// move together in one event per sample and go up at the end.
    pub fn multi_touch_swipe(
        &mut self,
        curves: &[&dyn Fn(i64) -> Point],
        duration_millis: i64,
        key_times: &[i64],
    ) -> Result<()> {
        require(!curves.is_empty(), || {
            "multi touch swipe needs at least one curve".to_string()
        })?;
        let times = swipe_times(duration_millis, key_times, self.event_period_millis())?;
        let ids = 0..curves.len() as PointerId;
        self.dispatcher.check_touch_pointers_free(ids.clone())?;

        for (id, curve) in ids.clone().zip(curves) {
            self.down(id, curve(0))?;
        }
        let mut previous = 0;
        for time in times {
            for (id, curve) in ids.clone().zip(curves) {
                self.update_pointer_to(id, curve(time))?;
            }
            self.move_pointers(time - previous)?;
            previous = time;
        }
        for id in ids {
            self.up(id)?;
        }
        Ok(())
    }

    /// Two finger gesture; pointer 0 moves from `start0` to `end0` and
    /// pointer 1 from `start1` to `end1`.
    pub fn pinch(
        &mut self,
        start0: Point,
        end0: Point,
        start1: Point,
        end1: Point,
        duration_millis: i64,
    ) -> Result<()> {
        let duration = duration_millis as f32;
        let first = move |time: i64| lerp(start0, end0, time as f32 / duration);
        let second = move |time: i64| lerp(start1, end1, time as f32 / duration);
        self.multi_touch_swipe(&[&first, &second], duration_millis, &[])
    }

    /// Swipe from `start` to `end` that ends moving at `end_velocity` px/s.
    ///
    /// Without a duration, the shortest duration that does not exceed the
    /// velocity is used.
    pub fn swipe_with_velocity(
        &mut self,
        start: Point,
        end: Point,
        end_velocity: f32,
        duration_millis: Option<i64>,
    ) -> Result<()> {
        require(end_velocity >= 0.0, || {
            format!("Velocity cannot be {end_velocity}, it must be positive")
        })?;
        let period = self.event_period_millis();
        require(period < MAX_VELOCITY_EVENT_PERIOD_MILLIS, || {
            format!(
                "event period must be smaller than {MAX_VELOCITY_EVENT_PERIOD_MILLIS}ms in order \
                 to generate velocities"
            )
        })?;
        let duration = duration_millis.unwrap_or_else(|| {
            VelocityPathFinder::default_duration(start, end, end_velocity, period)
        });
        let minimum = minimum_velocity_swipe_duration(period);
        require(duration >= minimum, || {
            format!(
                "Duration of {duration}ms is too short, velocity requires at least 3 input \
                 events: increase duration to at least {minimum}ms"
            )
        })?;

        let path = VelocityPathFinder::new(start, end, end_velocity, duration)?;
        self.swipe_along(|time| path.position_at(time), duration, &[])
    }

    /// Swipe up along the horizontal center, from the bottom to the top.
    pub fn swipe_up(&mut self, duration_millis: i64) -> Result<()> {
        let (start_y, end_y) = (self.bottom(), self.top());
        self.swipe_up_between(start_y, end_y, duration_millis)
    }

    pub fn swipe_up_between(&mut self, start_y: f32, end_y: f32, duration_millis: i64) -> Result<()> {
        require(start_y >= end_y, || {
            format!("startY={start_y} needs to be greater than or equal to endY={end_y}")
        })?;
        let x = self.center_x();
        self.swipe(Point::new(x, start_y), Point::new(x, end_y), duration_millis)
    }

    /// Swipe down along the horizontal center, from the top to the bottom.
    pub fn swipe_down(&mut self, duration_millis: i64) -> Result<()> {
        let (start_y, end_y) = (self.top(), self.bottom());
        self.swipe_down_between(start_y, end_y, duration_millis)
    }

    pub fn swipe_down_between(
        &mut self,
        start_y: f32,
        end_y: f32,
        duration_millis: i64,
    ) -> Result<()> {
        require(start_y <= end_y, || {
            format!("startY={start_y} needs to be less than or equal to endY={end_y}")
        })?;
        let x = self.center_x();
        self.swipe(Point::new(x, start_y), Point::new(x, end_y), duration_millis)
    }

    /// Swipe left along the vertical center, from the right to the left.
    pub fn swipe_left(&mut self, duration_millis: i64) -> Result<()> {
        let (start_x, end_x) = (self.right(), self.left());
        self.swipe_left_between(start_x, end_x, duration_millis)
    }

    pub fn swipe_left_between(
        &mut self,
        start_x: f32,
        end_x: f32,
        duration_millis: i64,
    ) -> Result<()> {
        require(start_x >= end_x, || {
            format!("startX={start_x} needs to be greater than or equal to endX={end_x}")
        })?;
        let y = self.center_y();
        self.swipe(Point::new(start_x, y), Point::new(end_x, y), duration_millis)
    }

    /// Swipe right along the vertical center, from the left to the right.
    pub fn swipe_right(&mut self, duration_millis: i64) -> Result<()> {
        let (start_x, end_x) = (self.left(), self.right());
        self.swipe_right_between(start_x, end_x, duration_millis)
    }

    pub fn swipe_right_between(
        &mut self,
        start_x: f32,
        end_x: f32,
        duration_millis: i64,
    ) -> Result<()> {
        require(start_x <= end_x, || {
            format!("startX={start_x} needs to be less than or equal to endX={end_x}")
        })?;
        let y = self.center_y();
        self.swipe(Point::new(start_x, y), Point::new(end_x, y), duration_millis)
    }
}

#[cfg(test)]
#[path = "../tests/touch_scope_tests.rs"]
mod tests;
