//! The input dispatcher.
//!
//! [`InputDispatcher`] owns the virtual clock, the per-modality gesture state
//! and the queue of events waiting to be flushed. Every `enqueue_*` operation
//! validates its preconditions before touching any state, so a failed call
//! leaves the dispatcher exactly as it was.
//!
//! Positions passed to the dispatcher are in root coordinates. Conversion from
//! a node's local space happens in the injection scopes.

use crate::clock::EventClock;
use crate::config::{InjectionConfig, ViewConfiguration};
use crate::error::{check, require, Result};
use crate::event::{
    EventAction, HistoricalSample, InjectedEvent, Key, KeyAction, KeyEvent, MouseButton,
    PointerId, PointerType, PrimitiveEvent, RotaryEvent, ScrollDelta, ScrollWheel,
};
use crate::input_constants::{INITIAL_KEY_REPEAT_DELAY_MILLIS, SUBSEQUENT_KEY_REPEAT_DELAY_MILLIS};
use crate::queue::{EventQueue, EventSink};
use crate::state::{GestureState, KeyInputState};
use cranpose_ui_graphics::{Point, Rect};
use log::debug;
use smallvec::SmallVec;

pub struct InputDispatcher {
    config: InjectionConfig,
    clock: EventClock,
    queue: EventQueue,
    touch: GestureState,
    mouse: GestureState,
    keys: KeyInputState,
}

impl InputDispatcher {
    pub fn new(config: InjectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock: EventClock::new(),
            queue: EventQueue::new(),
            touch: GestureState::touch(),
            mouse: GestureState::mouse(),
            keys: KeyInputState::default(),
        })
    }

    pub fn config(&self) -> &InjectionConfig {
        &self.config
    }

    pub fn event_period_millis(&self) -> i64 {
        self.config.event_period_millis
    }

    pub fn view_configuration(&self) -> &ViewConfiguration {
        &self.config.view_configuration
    }

    pub fn root_bounds(&self) -> Rect {
        self.config.root_bounds
    }

    pub fn is_within_root_bounds(&self, position: Point) -> bool {
        self.config.root_bounds.contains(position)
    }

    pub fn current_time(&self) -> i64 {
        self.clock.current_time()
    }

    pub fn touch_state(&self) -> &GestureState {
        &self.touch
    }

    pub fn mouse_state(&self) -> &GestureState {
        &self.mouse
    }

    pub fn key_state(&self) -> &KeyInputState {
        &self.keys
    }

    pub fn pending_events(&self) -> &[InjectedEvent] {
        self.queue.pending()
    }

    pub fn is_touch_in_progress(&self) -> bool {
        self.touch.is_in_progress()
    }

    /// Position of touch pointer `id`, if it is down.
    pub fn current_touch_position(&self, id: PointerId) -> Option<Point> {
        self.touch.position(id)
    }

    pub fn current_mouse_position(&self) -> Point {
        self.mouse.mouse_position()
    }

    /// Moves the clock forward by `delta_millis`.
    ///
    /// Key repeats that fall due inside the interval are enqueued at their
    /// exact repeat time before the clock reaches its final value.
    pub fn advance_event_time(&mut self, delta_millis: i64) -> Result<()> {
        let end_time = self.clock.time_after(delta_millis)?;
        self.send_repeat_keys_until(end_time);
        self.clock.advance_to(end_time);
        Ok(())
    }

    /// Fails if `advance_event_time(delta_millis)` would be rejected.
    pub fn check_delay(&self, delta_millis: i64) -> Result<()> {
        self.clock.time_after(delta_millis).map(|_| ())
    }

    fn send_repeat_keys_until(&mut self, end_time: i64) {
        while let Some(repeat_time) = self.keys.next_repeat_time(
            INITIAL_KEY_REPEAT_DELAY_MILLIS,
            SUBSEQUENT_KEY_REPEAT_DELAY_MILLIS,
        ) {
            if repeat_time > end_time {
                break;
            }
            self.clock.advance_to(repeat_time);
            if let Some(key) = self.keys.record_repeat(repeat_time) {
                self.enqueue_key_event(KeyAction::Down, key, self.keys.repeat_count());
            }
        }
    }

    /// Delivers all pending events to `sink`. See [`EventQueue::flush`].
    pub fn flush<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.queue.flush(sink)
    }

    /// Drops all pending events. Gesture state is left as it is.
    pub fn discard_pending(&mut self) -> usize {
        self.queue.discard()
    }

    /// Fails unless none of `ids` is currently down.
    pub fn check_touch_pointers_free(&self, ids: impl IntoIterator<Item = PointerId>) -> Result<()> {
        for id in ids {
            require(!self.touch.contains(id), || {
                format!("Cannot send DOWN event, a gesture is already in progress for pointer {id}")
            })?;
        }
        Ok(())
    }

    // Touch

    pub fn enqueue_touch_down(&mut self, id: PointerId, position: Point) -> Result<()> {
        self.check_touch_pointers_free([id])?;

        if !self.mouse.buttons().is_empty() {
            debug!("touch down on pointer {id} cancels the mouse gesture");
            self.emit_mouse_cancel();
        } else if self.mouse.is_hovering() {
            self.exit_hover();
        }

        self.flush_pointer_updates();

        if !self.touch.is_in_progress() {
            self.touch.set_down_time(self.current_time());
        }
        self.touch.add_pointer(id, position);
        let action = if self.touch.pointer_count() == 1 {
            EventAction::Down
        } else {
            EventAction::PointerDown
        };
        self.emit_touch(action, id, Vec::new());
        Ok(())
    }

    /// Moves pointer `id` without sending an event. The next touch event
    /// carries the new position; down and up send a move first.
    pub fn update_touch_pointer(&mut self, id: PointerId, position: Point) -> Result<()> {
        check(self.touch.is_in_progress(), || {
            "Cannot move pointer, no gesture is in progress".to_string()
        })?;
        require(self.touch.contains(id), || {
            format!("Cannot move pointer {id}, it is not active in the current gesture")
        })?;
        self.touch.update_pointer(id, position);
        Ok(())
    }

    /// Fails unless a touch gesture is in progress. `event` names the event
    /// that needed one.
    pub fn check_touch_in_progress(&self, event: &str) -> Result<()> {
        check(self.touch.is_in_progress(), || {
            format!("Cannot send {event} event, no gesture is in progress")
        })
    }

    pub fn enqueue_touch_move(&mut self) -> Result<()> {
        self.check_touch_in_progress("MOVE")?;
        self.emit_touch_move(Vec::new());
        Ok(())
    }

    /// Fails unless `coordinates` holds one list per active touch pointer,
    /// each as long as `relative_times`.
    pub fn check_history_shape(
        &self,
        relative_times: &[i64],
        coordinates: &[Vec<Point>],
    ) -> Result<()> {
        let pointer_count = self.touch.pointer_count();
        require(coordinates.len() == pointer_count, || {
            format!(
                "historical coordinates must have one entry per pointer ({pointer_count}), not {}",
                coordinates.len()
            )
        })?;
        for (index, samples) in coordinates.iter().enumerate() {
            require(samples.len() == relative_times.len(), || {
                format!(
                    "historical coordinates of pointer index {index} have {} entries, expected {}",
                    samples.len(),
                    relative_times.len()
                )
            })?;
        }
        Ok(())
    }

    /// Sends a move carrying historical samples.
    ///
    /// `coordinates` holds one list per active pointer, in ascending id
    /// order, each as long as `relative_times`. Relative times are offsets
    /// from the current time.
    pub fn enqueue_touch_moves(
        &mut self,
        relative_times: &[i64],
        coordinates: &[Vec<Point>],
    ) -> Result<()> {
        self.check_touch_in_progress("MOVE")?;
        self.check_history_shape(relative_times, coordinates)?;
        let now = self.current_time();
        let history = relative_times
            .iter()
            .enumerate()
            .map(|(sample, relative)| HistoricalSample {
                event_time: now + relative,
                positions: coordinates
                    .iter()
                    .map(|pointer| pointer[sample])
                    .collect::<SmallVec<[Point; 4]>>(),
            })
            .collect();
        self.emit_touch_move(history);
        Ok(())
    }

    pub fn enqueue_touch_up(&mut self, id: PointerId) -> Result<()> {
        self.check_touch_in_progress("UP")?;
        require(self.touch.contains(id), || {
            format!("Cannot send UP event for pointer {id}, it is not active in the current gesture")
        })?;

        self.flush_pointer_updates();

        let action = if self.touch.pointer_count() == 1 {
            EventAction::Up
        } else {
            EventAction::PointerUp
        };
        self.emit_touch(action, id, Vec::new());
        self.touch.remove_pointer(id);
        Ok(())
    }

    /// Cancels the touch gesture. Unsent position updates are carried by the
    /// cancel event itself.
    pub fn enqueue_touch_cancel(&mut self) -> Result<()> {
        self.check_touch_in_progress("CANCEL")?;
        self.emit_touch_cancel();
        Ok(())
    }

    fn flush_pointer_updates(&mut self) {
        if self.touch.has_pointer_updates() {
            self.emit_touch_move(Vec::new());
        }
    }

    fn emit_touch_move(&mut self, history: Vec<HistoricalSample>) {
        let event = self.touch_event(EventAction::Move, 0, history);
        self.queue.enqueue(InjectedEvent::Pointer(event));
        self.touch.clear_pointer_updates();
    }

    fn emit_touch_cancel(&mut self) {
        let event = self.touch_event(EventAction::Cancel, 0, Vec::new());
        self.queue.enqueue(InjectedEvent::Pointer(event));
        self.touch.clear_pointers();
    }

    fn emit_touch(&mut self, action: EventAction, id: PointerId, history: Vec<HistoricalSample>) {
        let action_index = self.touch.action_index(id).unwrap_or(0);
        let event = self.touch_event(action, action_index, history);
        self.queue.enqueue(InjectedEvent::Pointer(event));
    }

    fn touch_event(
        &self,
        action: EventAction,
        action_index: usize,
        history: Vec<HistoricalSample>,
    ) -> PrimitiveEvent {
        PrimitiveEvent {
            event_time: self.current_time(),
            down_time: self.touch.down_time(),
            action,
            action_index,
            pointer_type: self.config.touch_pointer_type,
            pointers: self.touch.snapshots(),
            buttons: Default::default(),
            action_button: None,
            scroll: None,
            history,
        }
    }

    fn cancel_touch_for_mouse(&mut self) {
        if self.touch.is_in_progress() {
            debug!("mouse input cancels the touch gesture");
            self.emit_touch_cancel();
        }
    }

    // Mouse

    /// Fails if pressing `button` with the cursor at `position` would be
    /// rejected.
    pub fn check_mouse_press(&self, button: MouseButton, position: Point) -> Result<()> {
        check(!self.mouse.is_button_pressed(button), || {
            format!("Cannot send mouse button down event, button {button:?} is already pressed")
        })?;
        check(
            self.is_within_root_bounds(position) || self.mouse.is_in_progress(),
            || {
                format!(
                    "Cannot start a mouse gesture outside the root bounds, mouse position is \
                     {position:?} and bounds are {:?}",
                    self.root_bounds()
                )
            },
        )
    }

    pub fn enqueue_mouse_press(&mut self, button: MouseButton) -> Result<()> {
        let position = self.current_mouse_position();
        self.check_mouse_press(button, position)?;

        self.cancel_touch_for_mouse();

        let first_button = !self.mouse.is_in_progress();
        if first_button {
            self.mouse.set_down_time(self.current_time());
            if self.mouse.is_hovering() {
                self.exit_hover();
            }
        }
        self.mouse.press_button(button);
        let action = if first_button {
            EventAction::Down
        } else {
            EventAction::Move
        };
        self.emit_mouse(action, None, None);
        if self.is_within_root_bounds(position) {
            self.emit_mouse(EventAction::ButtonPress, Some(button), None);
        }
        Ok(())
    }

    pub fn enqueue_mouse_move(&mut self, position: Point) -> Result<()> {
        self.cancel_touch_for_mouse();
        self.mouse.set_mouse_position(position);

        let within_bounds = self.is_within_root_bounds(position);
        if within_bounds && !self.mouse.is_hovering() && !self.mouse.is_in_progress() {
            self.enter_hover();
        } else if !within_bounds && self.mouse.is_hovering() {
            self.exit_hover();
        }

        if self.mouse.is_in_progress() {
            self.emit_mouse(EventAction::Move, None, None);
        } else if self.mouse.is_hovering() {
            self.emit_mouse(EventAction::HoverMove, None, None);
        }
        Ok(())
    }

    /// Moves the cursor without sending an event.
    pub fn update_mouse_position(&mut self, position: Point) {
        self.mouse.set_mouse_position(position);
    }

    pub fn enqueue_mouse_release(&mut self, button: MouseButton) -> Result<()> {
        check(self.mouse.is_button_pressed(button), || {
            format!("Cannot send mouse button up event, button {button:?} is not pressed")
        })?;
        check(!self.touch.is_in_progress(), || {
            "Touch gesture can't be in progress, mouse buttons are down".to_string()
        })?;

        self.mouse.release_button(button);
        let within_bounds = self.is_within_root_bounds(self.current_mouse_position());
        if within_bounds {
            self.emit_mouse(EventAction::ButtonRelease, Some(button), None);
        }
        let last_button = !self.mouse.is_in_progress();
        let action = if last_button {
            EventAction::Up
        } else {
            EventAction::Move
        };
        self.emit_mouse(action, None, None);

        if last_button && within_bounds {
            self.enter_hover();
            self.emit_mouse(EventAction::HoverMove, None, None);
        }
        Ok(())
    }

    pub fn check_mouse_enter(&self, position: Point) -> Result<()> {
        check(!self.mouse.is_hovering(), || {
            "Cannot send mouse hover enter event, mouse is already hovering".to_string()
        })?;
        check(!self.mouse.is_in_progress(), || {
            "Cannot send mouse hover enter event, mouse buttons are down".to_string()
        })?;
        check(self.is_within_root_bounds(position), || {
            format!("Cannot send mouse hover enter event, {position:?} is out of bounds")
        })
    }

    pub fn enqueue_mouse_enter(&mut self, position: Point) -> Result<()> {
        self.check_mouse_enter(position)?;
        self.mouse.set_mouse_position(position);
        self.enter_hover();
        Ok(())
    }

    pub fn check_mouse_exit(&self) -> Result<()> {
        check(self.mouse.is_hovering(), || {
            "Cannot send mouse hover exit event, mouse is not hovering".to_string()
        })
    }

    pub fn enqueue_mouse_exit(&mut self, position: Point) -> Result<()> {
        self.check_mouse_exit()?;
        self.mouse.set_mouse_position(position);
        self.exit_hover();
        Ok(())
    }

    pub fn check_mouse_cancel(&self) -> Result<()> {
        check(self.mouse.is_in_progress(), || {
            "Cannot send mouse cancel event, no mouse buttons are pressed".to_string()
        })
    }

    pub fn enqueue_mouse_cancel(&mut self) -> Result<()> {
        self.check_mouse_cancel()?;
        self.emit_mouse_cancel();
        Ok(())
    }

    /// Scrolls the mouse wheel by `delta`; positive values scroll down or
    /// right. The scroll is preceded by a move to the current position.
    pub fn enqueue_mouse_scroll(&mut self, delta: f32, wheel: ScrollWheel) -> Result<()> {
        let position = self.current_mouse_position();
        self.enqueue_mouse_move(position)?;
        if self.is_within_root_bounds(position) {
            self.emit_mouse(EventAction::Scroll, None, Some(ScrollDelta { wheel, delta }));
        }
        Ok(())
    }

    fn emit_mouse_cancel(&mut self) {
        self.mouse.clear_buttons();
        self.emit_mouse(EventAction::Cancel, None, None);
    }

    fn enter_hover(&mut self) {
        self.emit_mouse(EventAction::HoverEnter, None, None);
        self.mouse.set_hovering(true);
    }

    fn exit_hover(&mut self) {
        self.emit_mouse(EventAction::HoverExit, None, None);
        self.mouse.set_hovering(false);
    }

    fn emit_mouse(
        &mut self,
        action: EventAction,
        action_button: Option<MouseButton>,
        scroll: Option<ScrollDelta>,
    ) {
        let event = PrimitiveEvent {
            event_time: self.current_time(),
            down_time: self.mouse.down_time(),
            action,
            action_index: 0,
            pointer_type: PointerType::Mouse,
            pointers: self.mouse.snapshots(),
            buttons: self.mouse.buttons(),
            action_button,
            scroll,
            history: Vec::new(),
        };
        self.queue.enqueue(InjectedEvent::Pointer(event));
    }

    // Keys

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_key_down(key)
    }

    pub fn is_caps_lock_on(&self) -> bool {
        self.keys.locks().caps_lock
    }

    pub fn is_num_lock_on(&self) -> bool {
        self.keys.locks().num_lock
    }

    pub fn is_scroll_lock_on(&self) -> bool {
        self.keys.locks().scroll_lock
    }

    pub fn enqueue_key_down(&mut self, key: Key) -> Result<()> {
        check(!self.keys.is_key_down(key), || {
            format!("Cannot send key down event, {key:?} is already pressed down")
        })?;
        self.keys.set_key_down(key, self.current_time());
        self.enqueue_key_event(KeyAction::Down, key, 0);
        Ok(())
    }

    pub fn enqueue_key_up(&mut self, key: Key) -> Result<()> {
        check(self.keys.is_key_down(key), || {
            format!("Cannot send key up event, {key:?} is not pressed down")
        })?;
        self.keys.set_key_up(key);
        self.enqueue_key_event(KeyAction::Up, key, 0);
        Ok(())
    }

    fn enqueue_key_event(&mut self, action: KeyAction, key: Key, repeat_count: u32) {
        let event = KeyEvent {
            event_time: self.current_time(),
            down_time: self.keys.down_time(),
            action,
            key,
            repeat_count,
            locks: self.keys.locks(),
        };
        self.queue.enqueue(InjectedEvent::Key(event));
    }

    // Rotary

    pub fn enqueue_rotary_scroll_horizontally(&mut self, pixels: f32) {
        self.enqueue_rotary(pixels, 0.0);
    }

    pub fn enqueue_rotary_scroll_vertically(&mut self, pixels: f32) {
        self.enqueue_rotary(0.0, pixels);
    }

    fn enqueue_rotary(&mut self, horizontal_scroll_pixels: f32, vertical_scroll_pixels: f32) {
        let event = RotaryEvent {
            event_time: self.current_time(),
            horizontal_scroll_pixels,
            vertical_scroll_pixels,
        };
        self.queue.enqueue(InjectedEvent::Rotary(event));
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
