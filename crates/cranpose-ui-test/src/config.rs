//! Configuration consumed by the injection engine.

use crate::error::{require, Result};
use crate::event::PointerType;
use crate::input_constants::{
    DEFAULT_EVENT_PERIOD_MILLIS, LONG_CLICK_EXTRA_MILLIS, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY,
    TOUCH_SLOP,
};
use cranpose_ui_graphics::{Rect, Size};

/// Platform gesture constants, supplied by the platform integration.
///
/// The defaults match a typical Android device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfiguration {
    pub long_press_timeout_millis: i64,
    /// Maximum time between the first up and the second down of a double tap.
    pub double_tap_timeout_millis: i64,
    /// Minimum time between the first up and the second down of a double tap.
    pub double_tap_min_time_millis: i64,
    pub touch_slop: f32,
    pub minimum_fling_velocity: f32,
    pub maximum_fling_velocity: f32,
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            long_press_timeout_millis: 500,
            double_tap_timeout_millis: 300,
            double_tap_min_time_millis: 40,
            touch_slop: TOUCH_SLOP,
            minimum_fling_velocity: MIN_FLING_VELOCITY,
            maximum_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}

impl ViewConfiguration {
    /// The midpoint of the double tap window.
    pub fn default_double_tap_delay_millis(&self) -> i64 {
        (self.double_tap_min_time_millis + self.double_tap_timeout_millis) / 2
    }

    pub fn default_long_click_duration_millis(&self) -> i64 {
        self.long_press_timeout_millis + LONG_CLICK_EXTRA_MILLIS
    }
}

/// Settings of one [`InputDispatcher`](crate::InputDispatcher).
#[derive(Clone, Debug, PartialEq)]
pub struct InjectionConfig {
    /// Nominal time between two synthesized move samples.
    pub event_period_millis: i64,
    /// Pointer type stamped on touch events; stylus input uses the touch path.
    pub touch_pointer_type: PointerType,
    /// Bounds of the root in root coordinates. Mouse hover and button events
    /// are only generated inside these bounds.
    pub root_bounds: Rect,
    pub view_configuration: ViewConfiguration,
}

impl InjectionConfig {
    pub fn new(root_bounds: Rect) -> Self {
        Self {
            event_period_millis: DEFAULT_EVENT_PERIOD_MILLIS,
            touch_pointer_type: PointerType::Touch,
            root_bounds,
            view_configuration: ViewConfiguration::default(),
        }
    }

    pub fn for_root_size(size: Size) -> Self {
        Self::new(Rect::from_size(size))
    }

    pub fn with_event_period_millis(mut self, event_period_millis: i64) -> Self {
        self.event_period_millis = event_period_millis;
        self
    }

    pub fn with_touch_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.touch_pointer_type = pointer_type;
        self
    }

    pub fn with_view_configuration(mut self, view_configuration: ViewConfiguration) -> Self {
        self.view_configuration = view_configuration;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require(self.event_period_millis >= 1, || {
            format!(
                "event period must be at least 1 millisecond, not {}",
                self.event_period_millis
            )
        })?;
        require(
            matches!(
                self.touch_pointer_type,
                PointerType::Touch | PointerType::Stylus | PointerType::Eraser
            ),
            || {
                format!(
                    "touch input cannot use pointer type {:?}",
                    self.touch_pointer_type
                )
            },
        )?;
        let view = &self.view_configuration;
        require(
            view.double_tap_min_time_millis <= view.double_tap_timeout_millis,
            || {
                format!(
                    "double tap window [{}, {}) is empty",
                    view.double_tap_min_time_millis, view.double_tap_timeout_millis
                )
            },
        )
    }
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}
