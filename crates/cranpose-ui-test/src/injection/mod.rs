//! Gesture DSL over an [`InputDispatcher`].
//!
//! Each scope borrows the dispatcher mutably and the node's
//! [`CoordinateMapper`] immutably for as long as the test block runs.
//! Positions passed to a scope are in the node's local coordinate space.

/// Implements [`InjectionScope`] for a scope struct holding `dispatcher`
/// and `mapper` fields.
macro_rules! impl_injection_scope {
    ($scope:ident) => {
        impl crate::injection::InjectionScope for $scope<'_> {
            fn dispatcher(&self) -> &crate::dispatcher::InputDispatcher {
                &*self.dispatcher
            }

            fn dispatcher_mut(&mut self) -> &mut crate::dispatcher::InputDispatcher {
                &mut *self.dispatcher
            }

            fn mapper(&self) -> &dyn crate::coordinates::CoordinateMapper {
                self.mapper
            }
        }
    };
}

mod key;
mod mouse;
mod multi_modal;
mod rotary;
mod touch;

pub use key::KeyInjectionScope;
pub use mouse::MouseInjectionScope;
pub use multi_modal::MultiModalInjectionScope;
pub use rotary::RotaryInjectionScope;
pub use touch::TouchInjectionScope;

use crate::config::ViewConfiguration;
use crate::coordinates::CoordinateMapper;
use crate::dispatcher::InputDispatcher;
use crate::error::Result;
use cranpose_ui_graphics::{Point, Size};

/// Behaviour shared by every injection scope: node geometry, time and
/// coordinate conversion.
pub trait InjectionScope {
    fn dispatcher(&self) -> &InputDispatcher;

    fn dispatcher_mut(&mut self) -> &mut InputDispatcher;

    fn mapper(&self) -> &dyn CoordinateMapper;

    fn visible_size(&self) -> Size {
        self.mapper().size()
    }

    fn width(&self) -> f32 {
        self.visible_size().width
    }

    fn height(&self) -> f32 {
        self.visible_size().height
    }

    fn left(&self) -> f32 {
        0.0
    }

    fn top(&self) -> f32 {
        0.0
    }

    /// The last pixel column inside the node.
    fn right(&self) -> f32 {
        last_pixel(self.width())
    }

    /// The last pixel row inside the node.
    fn bottom(&self) -> f32 {
        last_pixel(self.height())
    }

    fn center_x(&self) -> f32 {
        self.width() / 2.0
    }

    fn center_y(&self) -> f32 {
        self.height() / 2.0
    }

    fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    fn top_center(&self) -> Point {
        Point::new(self.center_x(), self.top())
    }

    fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    fn center_left(&self) -> Point {
        Point::new(self.left(), self.center_y())
    }

    fn center_right(&self) -> Point {
        Point::new(self.right(), self.center_y())
    }

    fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    fn bottom_center(&self) -> Point {
        Point::new(self.center_x(), self.bottom())
    }

    fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    fn event_period_millis(&self) -> i64 {
        self.dispatcher().event_period_millis()
    }

    fn view_configuration(&self) -> ViewConfiguration {
        *self.dispatcher().view_configuration()
    }

    fn current_time(&self) -> i64 {
        self.dispatcher().current_time()
    }

    /// Adds `delta_millis` to the event time. The next event is sent that
    /// much later than the previous one.
    fn advance_event_time(&mut self, delta_millis: i64) -> Result<()> {
        self.dispatcher_mut().advance_event_time(delta_millis)
    }

    fn local_to_root(&self, position: Point) -> Point {
        self.mapper().local_to_root(position)
    }

    fn root_to_local(&self, position: Point) -> Point {
        self.mapper().root_to_local(position)
    }
}

fn last_pixel(extent: f32) -> f32 {
    if extent > 0.0 {
        extent - 1.0
    } else {
        0.0
    }
}
