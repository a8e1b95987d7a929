use super::InjectionScope;
use crate::coordinates::CoordinateMapper;
use crate::dispatcher::InputDispatcher;
use crate::error::{require, Result};
use crate::event::{MouseButton, ScrollWheel};
use crate::input_constants::{LONG_CLICK_EXTRA_MILLIS, SINGLE_CLICK_DELAY_MILLIS};
use crate::synth::{lerp_time, scroll_steps, step_count};
use cranpose_ui_graphics::{lerp, Point};

/// Mouse gestures on one node.
///
/// The cursor survives between gestures: it starts at the root origin and
/// stays wherever the last gesture left it.
pub struct MouseInjectionScope<'a> {
    dispatcher: &'a mut InputDispatcher,
    mapper: &'a dyn CoordinateMapper,
}

impl_injection_scope!(MouseInjectionScope);

impl<'a> MouseInjectionScope<'a> {
    pub fn new(dispatcher: &'a mut InputDispatcher, mapper: &'a dyn CoordinateMapper) -> Self {
        Self { dispatcher, mapper }
    }

    /// Cursor position in the node's local space.
    pub fn current_position(&self) -> Point {
        self.root_to_local(self.dispatcher.current_mouse_position())
    }

    /// Moves the cursor to `position`, `delay_millis` after the previous
    /// event. Enters or exits hover as the cursor crosses the root bounds.
    pub fn move_to(&mut self, position: Point, delay_millis: i64) -> Result<()> {
        self.advance_event_time(delay_millis)?;
        let position = self.local_to_root(position);
        self.dispatcher.enqueue_mouse_move(position)
    }

    pub fn move_by(&mut self, delta: Point, delay_millis: i64) -> Result<()> {
        let target = self.current_position() + delta;
        self.move_to(target, delay_millis)
    }

    /// Moves the cursor without sending an event.
    pub fn update_pointer_to(&mut self, position: Point) {
        let position = self.local_to_root(position);
        self.dispatcher.update_mouse_position(position);
    }

    pub fn update_pointer_by(&mut self, delta: Point) {
        let target = self.current_position() + delta;
        self.update_pointer_to(target);
    }

    pub fn press(&mut self, button: MouseButton) -> Result<()> {
        self.dispatcher.enqueue_mouse_press(button)
    }

    pub fn release(&mut self, button: MouseButton) -> Result<()> {
        self.dispatcher.enqueue_mouse_release(button)
    }

    /// Cancels the pressed buttons `delay_millis` after the previous event.
    pub fn cancel(&mut self, delay_millis: i64) -> Result<()> {
        self.dispatcher.check_mouse_cancel()?;
        self.advance_event_time(delay_millis)?;
        self.dispatcher.enqueue_mouse_cancel()
    }

    pub fn enter(&mut self, position: Point, delay_millis: i64) -> Result<()> {
        let root_position = self.local_to_root(position);
        self.dispatcher.check_mouse_enter(root_position)?;
        self.advance_event_time(delay_millis)?;
        self.dispatcher.enqueue_mouse_enter(root_position)
    }

    pub fn exit(&mut self, position: Point, delay_millis: i64) -> Result<()> {
        self.dispatcher.check_mouse_exit()?;
        self.advance_event_time(delay_millis)?;
        let position = self.local_to_root(position);
        self.dispatcher.enqueue_mouse_exit(position)
    }

    /// Turns `wheel` by `delta`; positive values scroll down or right.
    pub fn scroll(&mut self, delta: f32, wheel: ScrollWheel) -> Result<()> {
        self.dispatcher.enqueue_mouse_scroll(delta, wheel)
    }

    // Gestures

    fn click_with(&mut self, position: Point, button: MouseButton, hold_millis: i64) -> Result<()> {
        let root_position = self.local_to_root(position);
        self.dispatcher.check_mouse_press(button, root_position)?;
        self.update_pointer_to(position);
        self.press(button)?;
        self.advance_event_time(hold_millis)?;
        self.release(button)
    }

    /// Primary click at `position`, held for 60ms.
    pub fn click(&mut self, position: Point) -> Result<()> {
        self.click_with(position, MouseButton::Primary, SINGLE_CLICK_DELAY_MILLIS)
    }

    pub fn right_click(&mut self, position: Point) -> Result<()> {
        self.click_with(position, MouseButton::Secondary, SINGLE_CLICK_DELAY_MILLIS)
    }

    pub fn double_click(&mut self, position: Point) -> Result<()> {
        self.repeated_click(position, 2)
    }

    pub fn triple_click(&mut self, position: Point) -> Result<()> {
        self.repeated_click(position, 3)
    }

    fn repeated_click(&mut self, position: Point, clicks: usize) -> Result<()> {
        let delay = self.view_configuration().default_double_tap_delay_millis();
        for click in 0..clicks {
            if click > 0 {
                self.advance_event_time(delay)?;
            }
            self.click(position)?;
        }
        Ok(())
    }

    /// Primary press held for the long press timeout plus 100ms.
    pub fn long_click(&mut self, position: Point) -> Result<()> {
        let hold = self.view_configuration().long_press_timeout_millis + LONG_CLICK_EXTRA_MILLIS;
        self.click_with(position, MouseButton::Primary, hold)
    }

    /// Moves the cursor in a straight line to `position`.
    pub fn animate_to(&mut self, position: Point, duration_millis: i64) -> Result<()> {
        let start = self.current_position();
        let duration = duration_millis as f32;
        self.animate_along(
            |time| lerp(start, position, time as f32 / duration),
            duration_millis,
        )
    }

    pub fn animate_by(&mut self, delta: Point, duration_millis: i64) -> Result<()> {
        let target = self.current_position() + delta;
        self.animate_to(target, duration_millis)
    }

    /// Moves the cursor along `curve`. If the curve does not start at the
    /// cursor, the cursor first jumps there without taking time.
    pub fn animate_along(
        &mut self,
        curve: impl Fn(i64) -> Point,
        duration_millis: i64,
    ) -> Result<()> {
        require(duration_millis > 0, || {
            format!("Duration must be positive, not {duration_millis}")
        })?;
        let start = curve(0);
        if start != self.current_position() {
            self.move_to(start, 0)?;
        }

        let steps = step_count(duration_millis, self.event_period_millis());
        let mut previous = 0;
        for step in 1..=steps {
            let time = lerp_time(0, duration_millis, step as f32 / steps as f32);
            self.move_to(curve(time), time - previous)?;
            previous = time;
        }
        Ok(())
    }

    /// Presses the primary button at `start`, moves to `end` and releases.
    pub fn drag_and_drop(&mut self, start: Point, end: Point, duration_millis: i64) -> Result<()> {
        require(duration_millis > 0, || {
            format!("Duration must be positive, not {duration_millis}")
        })?;
        let root_start = self.local_to_root(start);
        self.dispatcher
            .check_mouse_press(MouseButton::Primary, root_start)?;
        self.update_pointer_to(start);
        self.press(MouseButton::Primary)?;
        self.animate_to(end, duration_millis)?;
        self.release(MouseButton::Primary)
    }

    /// Scrolls `amount` in steps spread evenly over `duration_millis`.
    pub fn smooth_scroll(
        &mut self,
        amount: f32,
        duration_millis: i64,
        wheel: ScrollWheel,
    ) -> Result<()> {
        require(duration_millis > 0, || {
            format!("Duration must be positive, not {duration_millis}")
        })?;
        for step in scroll_steps(amount, duration_millis, self.event_period_millis()) {
            self.advance_event_time(step.delay_millis)?;
            self.scroll(step.delta, wheel)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/mouse_scope_tests.rs"]
mod tests;
