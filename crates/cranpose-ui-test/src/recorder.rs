//! An [`EventSink`] that keeps everything it receives.

use crate::error::SinkError;
use crate::event::{EventAction, InjectedEvent, KeyEvent, PrimitiveEvent, RotaryEvent};
use crate::queue::EventSink;
use std::cell::RefCell;
use std::rc::Rc;

/// Records delivered events into a buffer shared with its clones.
///
/// Hand one clone to the rule and keep another to inspect what was delivered.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<InjectedEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<InjectedEvent> {
        self.events.borrow().clone()
    }

    pub fn pointer_events(&self) -> Vec<PrimitiveEvent> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| event.as_pointer().cloned())
            .collect()
    }

    pub fn key_events(&self) -> Vec<KeyEvent> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| event.as_key().copied())
            .collect()
    }

    pub fn rotary_events(&self) -> Vec<RotaryEvent> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| event.as_rotary().copied())
            .collect()
    }

    /// Actions of the recorded pointer events, in delivery order.
    pub fn actions(&self) -> Vec<EventAction> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| event.as_pointer().map(|pointer| pointer.action))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for RecordingSink {
    fn deliver(&mut self, event: &InjectedEvent) -> Result<(), SinkError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}
