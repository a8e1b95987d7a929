//! Primitive events produced by the dispatcher.
//!
//! Events are immutable once enqueued. Pointer events always carry the full
//! set of currently known pointers, not just the one that changed, the way
//! platform motion events do.

use cranpose_ui_graphics::Point;
use smallvec::SmallVec;

pub type PointerId = u32;

/// Pointer id used for the mouse cursor.
pub const MOUSE_POINTER_ID: PointerId = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    Touch,
    Mouse,
    Stylus,
    Eraser,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

impl MouseButton {
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Primary,
        MouseButton::Secondary,
        MouseButton::Middle,
        MouseButton::Back,
        MouseButton::Forward,
    ];
}

/// Set of pressed mouse buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MouseButtons(u8);

impl MouseButtons {
    pub const NONE: Self = Self(0);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, button: MouseButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !(1 << (button as u8));
    }

    pub fn contains(&self, button: MouseButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = MouseButton> + '_ {
        MouseButton::ALL
            .into_iter()
            .filter(move |button| self.contains(*button))
    }
}

impl Default for MouseButtons {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollWheel {
    Vertical,
    Horizontal,
}

/// Scroll amount of a [`EventAction::Scroll`] event. Positive values scroll
/// down or right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollDelta {
    pub wheel: ScrollWheel,
    pub delta: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventAction {
    /// First pointer of a gesture went down.
    Down,
    /// An additional pointer went down while others are down.
    PointerDown,
    Move,
    /// A pointer went up while others stay down.
    PointerUp,
    /// Last pointer of a gesture went up.
    Up,
    Cancel,
    HoverEnter,
    HoverMove,
    HoverExit,
    ButtonPress,
    ButtonRelease,
    Scroll,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSnapshot {
    pub id: PointerId,
    pub position: Point,
}

pub type PointerSnapshots = SmallVec<[PointerSnapshot; 4]>;

/// A sample that happened between the previous move and the move carrying it.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalSample {
    pub event_time: i64,
    /// One position per pointer, in the order of [`PrimitiveEvent::pointers`].
    pub positions: SmallVec<[Point; 4]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveEvent {
    pub event_time: i64,
    /// Time of the first down of the gesture this event belongs to.
    pub down_time: i64,
    pub action: EventAction,
    /// Index into `pointers` of the pointer that triggered the action.
    pub action_index: usize,
    pub pointer_type: PointerType,
    /// All known pointers, ascending by id.
    pub pointers: PointerSnapshots,
    /// Pressed mouse buttons after this event.
    pub buttons: MouseButtons,
    pub action_button: Option<MouseButton>,
    pub scroll: Option<ScrollDelta>,
    pub history: Vec<HistoricalSample>,
}

impl PrimitiveEvent {
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer(&self, id: PointerId) -> Option<&PointerSnapshot> {
        self.pointers.iter().find(|pointer| pointer.id == id)
    }

    pub fn position_of(&self, id: PointerId) -> Option<Point> {
        self.pointer(id).map(|pointer| pointer.position)
    }

    pub fn action_pointer(&self) -> Option<&PointerSnapshot> {
        self.pointers.get(self.action_index)
    }

    /// Position of the action pointer.
    pub fn position(&self) -> Option<Point> {
        self.action_pointer().map(|pointer| pointer.position)
    }
}

/// Platform independent key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub u32);

impl Key {
    pub const A: Key = Key(29);
    pub const B: Key = Key(30);
    pub const C: Key = Key(31);
    pub const V: Key = Key(50);
    pub const X: Key = Key(52);
    pub const Z: Key = Key(54);
    pub const TAB: Key = Key(61);
    pub const SPACE: Key = Key(62);
    pub const ENTER: Key = Key(66);
    pub const BACKSPACE: Key = Key(67);
    pub const ESCAPE: Key = Key(111);
    pub const DIRECTION_UP: Key = Key(19);
    pub const DIRECTION_DOWN: Key = Key(20);
    pub const DIRECTION_LEFT: Key = Key(21);
    pub const DIRECTION_RIGHT: Key = Key(22);
    pub const SHIFT_LEFT: Key = Key(59);
    pub const CTRL_LEFT: Key = Key(113);
    pub const ALT_LEFT: Key = Key(57);
    pub const CAPS_LOCK: Key = Key(115);
    pub const SCROLL_LOCK: Key = Key(116);
    pub const NUM_LOCK: Key = Key(143);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LockState {
    pub caps_lock: bool,
    pub num_lock: bool,
    pub scroll_lock: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub event_time: i64,
    /// Time of the most recent key down.
    pub down_time: i64,
    pub action: KeyAction,
    pub key: Key,
    /// 0 for the initial down, incremented for every synthesized repeat.
    pub repeat_count: u32,
    pub locks: LockState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotaryEvent {
    pub event_time: i64,
    pub horizontal_scroll_pixels: f32,
    pub vertical_scroll_pixels: f32,
}

/// Unit of delivery to an [`EventSink`](crate::EventSink).
#[derive(Clone, Debug, PartialEq)]
pub enum InjectedEvent {
    Pointer(PrimitiveEvent),
    Key(KeyEvent),
    Rotary(RotaryEvent),
}

impl InjectedEvent {
    pub fn event_time(&self) -> i64 {
        match self {
            InjectedEvent::Pointer(event) => event.event_time,
            InjectedEvent::Key(event) => event.event_time,
            InjectedEvent::Rotary(event) => event.event_time,
        }
    }

    pub fn as_pointer(&self) -> Option<&PrimitiveEvent> {
        match self {
            InjectedEvent::Pointer(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            InjectedEvent::Key(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_rotary(&self) -> Option<&RotaryEvent> {
        match self {
            InjectedEvent::Rotary(event) => Some(event),
            _ => None,
        }
    }
}
