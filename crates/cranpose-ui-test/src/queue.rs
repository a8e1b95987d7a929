//! Pending events and their delivery to the platform pipeline.

use crate::error::{Result, SinkError};
use crate::event::InjectedEvent;
use log::{debug, trace, warn};

/// The platform's event pipeline.
///
/// Delivery is synchronous: when `deliver` returns, the event has been fully
/// handled.
pub trait EventSink {
    fn deliver(&mut self, event: &InjectedEvent) -> std::result::Result<(), SinkError>;
}

impl<F> EventSink for F
where
    F: FnMut(&InjectedEvent) -> std::result::Result<(), SinkError>,
{
    fn deliver(&mut self, event: &InjectedEvent) -> std::result::Result<(), SinkError> {
        self(event)
    }
}

/// Events enqueued but not yet delivered, in enqueue order.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<InjectedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn enqueue(&mut self, event: InjectedEvent) {
        trace!("enqueue {event:?}");
        self.pending.push(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[InjectedEvent] {
        &self.pending
    }

    /// Drops every pending event without delivering it. Returns how many
    /// were dropped.
    pub fn discard(&mut self) -> usize {
        let dropped = self.pending.len();
        if dropped > 0 {
            warn!("dropping {dropped} undelivered input events");
        }
        self.pending.clear();
        dropped
    }

    /// Delivers every pending event to `sink`, oldest first.
    ///
    /// The queue is empty afterwards in all cases. When the sink fails, the
    /// events after the failing one are dropped and the failure is returned.
    pub fn flush<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let total = self.pending.len();
        debug!("flushing {total} input events");
        for (delivered, event) in self.pending.drain(..).enumerate() {
            if let Err(error) = sink.deliver(&event) {
                warn!(
                    "input delivery failed after {delivered} of {total} events, dropping the rest: {error}"
                );
                return Err(error.into());
            }
        }
        debug!("flushed {total} input events");
        Ok(())
    }
}
