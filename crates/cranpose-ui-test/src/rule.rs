//! Test rule for driving input into a node
//!
//! [`InputTestRule`] owns the dispatcher, the platform sink and the node's
//! coordinate mapper. Each `perform_*_input` call runs a block against an
//! injection scope and then delivers everything the block enqueued.
//!
//! # Example
//!
//! ```
//! use cranpose_ui_test::rule::create_headless_input_test;
//! use cranpose_ui_test::InjectionScope;
//!
//! let (mut rule, recorder) = create_headless_input_test(800, 600).unwrap();
//!
//! rule.perform_touch_input(|touch| {
//!     let center = touch.center();
//!     touch.click(center)
//! })
//! .unwrap();
//!
//! assert_eq!(recorder.pointer_events().len(), 3);
//! ```

use crate::config::InjectionConfig;
use crate::coordinates::{CoordinateMapper, NodeTransform};
use crate::dispatcher::InputDispatcher;
use crate::error::Result;
use crate::injection::{
    KeyInjectionScope, MouseInjectionScope, MultiModalInjectionScope, RotaryInjectionScope,
    TouchInjectionScope,
};
use crate::queue::EventSink;
use crate::recorder::RecordingSink;
use cranpose_ui_graphics::Size;

/// Programmatic input control over a single node.
///
/// Gesture state persists between `perform_*_input` calls, so a gesture can
/// be started in one call and finished in a later one.
pub struct InputTestRule<S, M>
where
    S: EventSink,
    M: CoordinateMapper,
{
    dispatcher: InputDispatcher,
    sink: S,
    mapper: M,
}

impl<S, M> InputTestRule<S, M>
where
    S: EventSink,
    M: CoordinateMapper,
{
    pub fn new(config: InjectionConfig, sink: S, mapper: M) -> Result<Self> {
        Ok(Self {
            dispatcher: InputDispatcher::new(config)?,
            sink,
            mapper,
        })
    }

    pub fn dispatcher(&self) -> &InputDispatcher {
        &self.dispatcher
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Point the rule at another node. Dispatcher state is kept.
    pub fn set_mapper(&mut self, mapper: M) {
        self.mapper = mapper;
    }

    pub fn current_time(&self) -> i64 {
        self.dispatcher.current_time()
    }

    /// Runs a touch gesture and delivers its events.
    ///
    /// If `block` fails, every event it enqueued is dropped and the error is
    /// returned. The touch state is not rolled back.
    pub fn perform_touch_input<R>(
        &mut self,
        block: impl FnOnce(&mut TouchInjectionScope<'_>) -> Result<R>,
    ) -> Result<R> {
        let result = {
            let mut scope = TouchInjectionScope::new(&mut self.dispatcher, &self.mapper);
            block(&mut scope)
        };
        self.finish(result)
    }

    pub fn perform_mouse_input<R>(
        &mut self,
        block: impl FnOnce(&mut MouseInjectionScope<'_>) -> Result<R>,
    ) -> Result<R> {
        let result = {
            let mut scope = MouseInjectionScope::new(&mut self.dispatcher, &self.mapper);
            block(&mut scope)
        };
        self.finish(result)
    }

    pub fn perform_key_input<R>(
        &mut self,
        block: impl FnOnce(&mut KeyInjectionScope<'_>) -> Result<R>,
    ) -> Result<R> {
        let result = {
            let mut scope = KeyInjectionScope::new(&mut self.dispatcher, &self.mapper);
            block(&mut scope)
        };
        self.finish(result)
    }

    pub fn perform_rotary_input<R>(
        &mut self,
        block: impl FnOnce(&mut RotaryInjectionScope<'_>) -> Result<R>,
    ) -> Result<R> {
        let result = {
            let mut scope = RotaryInjectionScope::new(&mut self.dispatcher, &self.mapper);
            block(&mut scope)
        };
        self.finish(result)
    }

    /// Runs a block that may mix touch, mouse, key and rotary input.
    pub fn perform_multi_modal_input<R>(
        &mut self,
        block: impl FnOnce(&mut MultiModalInjectionScope<'_>) -> Result<R>,
    ) -> Result<R> {
        let result = {
            let mut scope = MultiModalInjectionScope::new(&mut self.dispatcher, &self.mapper);
            block(&mut scope)
        };
        self.finish(result)
    }

    fn finish<R>(&mut self, result: Result<R>) -> Result<R> {
        match result {
            Ok(value) => {
                self.dispatcher.flush(&mut self.sink)?;
                Ok(value)
            }
            Err(error) => {
                self.dispatcher.discard_pending();
                Err(error)
            }
        }
    }
}

/// Create a rule over a node covering a `width` x `height` root, recording
/// every delivered event.
///
/// The returned [`RecordingSink`] shares its buffer with the one owned by
/// the rule.
pub fn create_headless_input_test(
    width: u32,
    height: u32,
) -> Result<(InputTestRule<RecordingSink, NodeTransform>, RecordingSink)> {
    let size = Size::new(width as f32, height as f32);
    let recorder = RecordingSink::new();
    let rule = InputTestRule::new(
        InjectionConfig::for_root_size(size),
        recorder.clone(),
        NodeTransform::covering(size),
    )?;
    Ok((rule, recorder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InjectionError, SinkError};
    use crate::event::{EventAction, InjectedEvent};
    use crate::injection::InjectionScope;
    use cranpose_ui_graphics::Point;

    #[test]
    fn test_rule_creation() {
        let (rule, recorder) = create_headless_input_test(800, 600).unwrap();

        assert_eq!(rule.current_time(), 0);
        assert_eq!(rule.dispatcher().root_bounds().width, 800.0);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_events_are_delivered_after_block() {
        let (mut rule, recorder) = create_headless_input_test(800, 600).unwrap();

        rule.perform_touch_input(|touch| {
            touch.down(0, Point::new(10.0, 10.0))?;
            assert!(recorder.is_empty());
            Ok(())
        })
        .unwrap();

        assert_eq!(recorder.actions(), vec![EventAction::Down]);
        assert!(rule.dispatcher().pending_events().is_empty());
    }

    #[test]
    fn test_gesture_continues_across_calls() {
        let (mut rule, recorder) = create_headless_input_test(800, 600).unwrap();

        rule.perform_touch_input(|touch| touch.down(0, Point::new(10.0, 10.0)))
            .unwrap();
        rule.perform_touch_input(|touch| {
            touch.move_to(0, Point::new(20.0, 10.0), 16)?;
            touch.up(0)
        })
        .unwrap();

        assert_eq!(
            recorder.actions(),
            vec![EventAction::Down, EventAction::Move, EventAction::Up]
        );
        assert!(!rule.dispatcher().is_touch_in_progress());
    }

    #[test]
    fn test_failing_block_drops_its_events() {
        let (mut rule, recorder) = create_headless_input_test(800, 600).unwrap();

        let error = rule
            .perform_touch_input(|touch| {
                touch.down(0, Point::new(10.0, 10.0))?;
                touch.down(0, Point::new(20.0, 20.0))
            })
            .unwrap_err();

        assert!(error.is_illegal_argument());
        assert!(recorder.is_empty());
        assert!(rule.dispatcher().pending_events().is_empty());
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let mut delivered = 0;
        let sink = move |_: &InjectedEvent| {
            delivered += 1;
            if delivered == 2 {
                Err(SinkError::new("pipeline closed"))
            } else {
                Ok(())
            }
        };
        let size = Size::new(100.0, 100.0);
        let mut rule = InputTestRule::new(
            InjectionConfig::for_root_size(size),
            sink,
            NodeTransform::covering(size),
        )
        .unwrap();

        let error = rule
            .perform_touch_input(|touch| {
                let center = touch.center();
                touch.click(center)
            })
            .unwrap_err();

        assert!(matches!(error, InjectionError::Delivery(_)));
        assert!(rule.dispatcher().pending_events().is_empty());
    }

    #[test]
    fn test_block_value_is_returned() {
        let (mut rule, _recorder) = create_headless_input_test(200, 100).unwrap();

        let size = rule
            .perform_mouse_input(|mouse| Ok(mouse.visible_size()))
            .unwrap();

        assert_eq!(size, Size::new(200.0, 100.0));
    }
}
