//! Shared timing and threshold constants for synthesized input.
//!
//! Values are in milliseconds or logical pixels. Platform-dependent values
//! (long press, double tap) live in [`ViewConfiguration`](crate::ViewConfiguration)
//! instead; these are the fixed defaults of the injection engine itself.

/// Default time between two successively injected events.
///
/// Events are normally sent once per frame, ~16ms on a 60Hz screen.
pub const DEFAULT_EVENT_PERIOD_MILLIS: i64 = 16;

/// Delay between a key down and the first repeat of that key.
pub const INITIAL_KEY_REPEAT_DELAY_MILLIS: i64 = 500;

/// Interval between subsequent repeats of a held key.
pub const SUBSEQUENT_KEY_REPEAT_DELAY_MILLIS: i64 = 50;

/// Time between press and release of a mouse single click.
pub const SINGLE_CLICK_DELAY_MILLIS: i64 = 60;

/// Extra time a long click is held beyond the long press timeout.
pub const LONG_CLICK_EXTRA_MILLIS: i64 = 100;

/// Conventional gesture durations for callers without timing requirements.
pub const DEFAULT_SWIPE_DURATION_MILLIS: i64 = 200;

pub const DEFAULT_PINCH_DURATION_MILLIS: i64 = 400;

/// Used for mouse animations and drag and drop.
pub const DEFAULT_MOUSE_GESTURE_DURATION_MILLIS: i64 = 300;

/// Window over which a velocity tracker looks at samples. Swipes ending in a
/// requested velocity keep a constant speed over (at most) this window.
pub const VELOCITY_HORIZON_MILLIS: i64 = 100;

/// Event periods at or above this value are too coarse to express a velocity.
pub const MAX_VELOCITY_EVENT_PERIOD_MILLIS: i64 = 40;

/// Upper bound for the computed default duration of a velocity swipe.
pub const MAX_DEFAULT_VELOCITY_SWIPE_DURATION_MILLIS: i64 = 3_000;

/// Touch slop in logical pixels, matching the foundation drag threshold.
pub const TOUCH_SLOP: f32 = 8.0;

pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
