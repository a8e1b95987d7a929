//! Per-modality gesture state.
//!
//! A [`GestureState`] tracks the pointers of one input modality together with
//! the bookkeeping the dispatcher needs to emit correctly ordered events. The
//! touch and mouse sessions share this one type; operations that only make
//! sense for one modality assert it in debug builds.

use crate::event::{
    Key, LockState, MouseButton, MouseButtons, PointerId, PointerSnapshot, PointerSnapshots,
    MOUSE_POINTER_ID,
};
use cranpose_ui_graphics::Point;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modality {
    Touch,
    Mouse,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureState {
    modality: Modality,
    /// Known pointers keyed by id. Iteration order is ascending by id, which
    /// is the order pointers appear in events.
    pointers: BTreeMap<PointerId, Point>,
    /// Set when a position changed without an event reporting it.
    has_pointer_updates: bool,
    down_time: i64,
    buttons: MouseButtons,
    hovering: bool,
}

impl GestureState {
    pub fn touch() -> Self {
        Self {
            modality: Modality::Touch,
            pointers: BTreeMap::new(),
            has_pointer_updates: false,
            down_time: 0,
            buttons: MouseButtons::NONE,
            hovering: false,
        }
    }

    /// Mouse state with the cursor at the root origin.
    pub fn mouse() -> Self {
        let mut pointers = BTreeMap::new();
        pointers.insert(MOUSE_POINTER_ID, Point::ZERO);
        Self {
            modality: Modality::Mouse,
            pointers,
            has_pointer_updates: false,
            down_time: 0,
            buttons: MouseButtons::NONE,
            hovering: false,
        }
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    /// Touch: at least one pointer is down. Mouse: at least one button is
    /// pressed.
    pub fn is_in_progress(&self) -> bool {
        match self.modality {
            Modality::Touch => !self.pointers.is_empty(),
            Modality::Mouse => !self.buttons.is_empty(),
        }
    }

    pub fn down_time(&self) -> i64 {
        self.down_time
    }

    pub(crate) fn set_down_time(&mut self, time: i64) {
        self.down_time = time;
    }

    pub fn has_pointer_updates(&self) -> bool {
        self.has_pointer_updates
    }

    pub(crate) fn clear_pointer_updates(&mut self) {
        self.has_pointer_updates = false;
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.pointers.contains_key(&id)
    }

    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.pointers.get(&id).copied()
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_ids(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.pointers.keys().copied()
    }

    /// Index of `id` among the known pointers in ascending id order.
    pub fn action_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.keys().position(|known| *known == id)
    }

    pub fn snapshots(&self) -> PointerSnapshots {
        self.pointers
            .iter()
            .map(|(id, position)| PointerSnapshot {
                id: *id,
                position: *position,
            })
            .collect()
    }

    fn debug_expect_modality(&self, modality: Modality, operation: &str) {
        debug_assert_eq!(
            self.modality, modality,
            "{operation} is not supported by {:?} input",
            self.modality
        );
    }

    // Touch

    pub(crate) fn add_pointer(&mut self, id: PointerId, position: Point) {
        self.debug_expect_modality(Modality::Touch, "adding a pointer");
        self.pointers.insert(id, position);
    }

    /// Moves a known pointer without reporting it.
    pub(crate) fn update_pointer(&mut self, id: PointerId, position: Point) {
        self.debug_expect_modality(Modality::Touch, "updating a pointer");
        if let Some(current) = self.pointers.get_mut(&id) {
            *current = position;
            self.has_pointer_updates = true;
        }
    }

    pub(crate) fn remove_pointer(&mut self, id: PointerId) {
        self.debug_expect_modality(Modality::Touch, "removing a pointer");
        self.pointers.remove(&id);
        if self.pointers.is_empty() {
            self.has_pointer_updates = false;
        }
    }

    /// Ends the touch session.
    pub(crate) fn clear_pointers(&mut self) {
        self.debug_expect_modality(Modality::Touch, "clearing pointers");
        self.pointers.clear();
        self.has_pointer_updates = false;
    }

    // Mouse

    pub fn mouse_position(&self) -> Point {
        self.position(MOUSE_POINTER_ID).unwrap_or(Point::ZERO)
    }

    pub(crate) fn set_mouse_position(&mut self, position: Point) {
        self.debug_expect_modality(Modality::Mouse, "moving the cursor");
        self.pointers.insert(MOUSE_POINTER_ID, position);
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(button)
    }

    pub(crate) fn press_button(&mut self, button: MouseButton) {
        self.debug_expect_modality(Modality::Mouse, "pressing a button");
        self.buttons.insert(button);
    }

    pub(crate) fn release_button(&mut self, button: MouseButton) {
        self.debug_expect_modality(Modality::Mouse, "releasing a button");
        self.buttons.remove(button);
    }

    pub(crate) fn clear_buttons(&mut self) {
        self.debug_expect_modality(Modality::Mouse, "clearing buttons");
        self.buttons = MouseButtons::NONE;
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub(crate) fn set_hovering(&mut self, hovering: bool) {
        self.debug_expect_modality(Modality::Mouse, "hovering");
        self.hovering = hovering;
    }
}

/// Keyboard state: held keys, the key that auto-repeats and lock toggles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyInputState {
    down_keys: FxHashSet<Key>,
    down_time: i64,
    repeat_key: Option<Key>,
    repeat_count: u32,
    last_repeat_time: i64,
    locks: LockState,
}

impl KeyInputState {
    pub fn is_key_down(&self, key: Key) -> bool {
        self.down_keys.contains(&key)
    }

    pub fn down_time(&self) -> i64 {
        self.down_time
    }

    pub fn repeat_key(&self) -> Option<Key> {
        self.repeat_key
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn locks(&self) -> LockState {
        self.locks
    }

    pub(crate) fn set_key_down(&mut self, key: Key, time: i64) {
        self.down_keys.insert(key);
        self.down_time = time;
        self.last_repeat_time = time;
        self.repeat_key = Some(key);
        self.repeat_count = 0;
        match key {
            Key::CAPS_LOCK => self.locks.caps_lock = !self.locks.caps_lock,
            Key::NUM_LOCK => self.locks.num_lock = !self.locks.num_lock,
            Key::SCROLL_LOCK => self.locks.scroll_lock = !self.locks.scroll_lock,
            _ => {}
        }
    }

    pub(crate) fn set_key_up(&mut self, key: Key) {
        self.down_keys.remove(&key);
        if self.repeat_key == Some(key) {
            self.repeat_key = None;
            self.repeat_count = 0;
        }
    }

    /// Time of the next repeat of the held repeat key, if any.
    pub(crate) fn next_repeat_time(&self, initial_delay: i64, subsequent_delay: i64) -> Option<i64> {
        self.repeat_key?;
        if self.repeat_count == 0 {
            self.down_time.checked_add(initial_delay)
        } else {
            self.last_repeat_time.checked_add(subsequent_delay)
        }
    }

    /// Records a repeat at `time` and returns the key to emit.
    pub(crate) fn record_repeat(&mut self, time: i64) -> Option<Key> {
        let key = self.repeat_key?;
        self.repeat_count += 1;
        self.last_repeat_time = time;
        Some(key)
    }
}
