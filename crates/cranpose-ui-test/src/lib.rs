//! Input injection for Cranpose UI tests: gesture synthesis, virtual event
//! time and batched delivery of touch, mouse, key and rotary events

pub mod assertions;
pub mod clock;
pub mod config;
pub mod coordinates;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod injection;
pub mod input_constants;
pub mod queue;
pub mod recorder;
pub mod rule;
pub mod state;
pub mod synth;
pub mod velocity_path;
pub mod velocity_tracker;

// Re-export commonly used items
pub use config::{InjectionConfig, ViewConfiguration};
pub use coordinates::{CoordinateMapper, NodeTransform};
pub use dispatcher::InputDispatcher;
pub use error::{InjectionError, Result, SinkError};
pub use event::{
    EventAction, HistoricalSample, InjectedEvent, Key, KeyAction, KeyEvent, LockState,
    MouseButton, MouseButtons, PointerId, PointerSnapshot, PointerType, PrimitiveEvent,
    RotaryEvent, ScrollDelta, ScrollWheel, MOUSE_POINTER_ID,
};
pub use injection::{
    InjectionScope, KeyInjectionScope, MouseInjectionScope, MultiModalInjectionScope,
    RotaryInjectionScope, TouchInjectionScope,
};
pub use queue::EventSink;
pub use recorder::RecordingSink;
pub use rule::{create_headless_input_test, InputTestRule};
pub use velocity_path::VelocityPathFinder;
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::assertions;
    pub use crate::config::{InjectionConfig, ViewConfiguration};
    pub use crate::coordinates::{CoordinateMapper, NodeTransform};
    pub use crate::error::InjectionError;
    pub use crate::event::*;
    pub use crate::injection::*;
    pub use crate::queue::EventSink;
    pub use crate::recorder::RecordingSink;
    pub use crate::rule::*;
    pub use cranpose_ui_graphics::prelude::*;
}
