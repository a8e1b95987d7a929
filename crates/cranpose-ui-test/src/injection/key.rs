use super::InjectionScope;
use crate::coordinates::CoordinateMapper;
use crate::dispatcher::InputDispatcher;
use crate::error::{check, Result};
use crate::event::Key;

/// Keyboard input.
///
/// A held key repeats while event time advances: first after 500ms, then
/// every 50ms.
pub struct KeyInjectionScope<'a> {
    dispatcher: &'a mut InputDispatcher,
    mapper: &'a dyn CoordinateMapper,
}

impl_injection_scope!(KeyInjectionScope);

impl<'a> KeyInjectionScope<'a> {
    pub fn new(dispatcher: &'a mut InputDispatcher, mapper: &'a dyn CoordinateMapper) -> Self {
        Self { dispatcher, mapper }
    }

    pub fn key_down(&mut self, key: Key) -> Result<()> {
        self.dispatcher.enqueue_key_down(key)
    }

    pub fn key_up(&mut self, key: Key) -> Result<()> {
        self.dispatcher.enqueue_key_up(key)
    }

    /// Down, one event period, up.
    pub fn press_key(&mut self, key: Key) -> Result<()> {
        self.check_key_up(key)?;
        let period = self.event_period_millis();
        self.key_down(key)?;
        self.advance_event_time(period)?;
        self.key_up(key)
    }

    /// Presses `key` `times` times, one event period apart.
    pub fn press_key_times(&mut self, key: Key, times: usize) -> Result<()> {
        self.check_key_up(key)?;
        let period = self.event_period_millis();
        for press in 0..times {
            if press > 0 {
                self.advance_event_time(period)?;
            }
            self.press_key(key)?;
        }
        Ok(())
    }

    /// Holds `key` while `block` runs.
    pub fn with_key_down<R>(
        &mut self,
        key: Key,
        block: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.key_down(key)?;
        let result = block(self)?;
        self.key_up(key)?;
        Ok(result)
    }

    fn check_key_up(&self, key: Key) -> Result<()> {
        check(!self.dispatcher.is_key_down(key), || {
            format!("Cannot send key down event, {key:?} is already pressed down")
        })
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.dispatcher.is_key_down(key)
    }

    pub fn is_caps_lock_on(&self) -> bool {
        self.dispatcher.is_caps_lock_on()
    }

    pub fn is_num_lock_on(&self) -> bool {
        self.dispatcher.is_num_lock_on()
    }

    pub fn is_scroll_lock_on(&self) -> bool {
        self.dispatcher.is_scroll_lock_on()
    }
}

#[cfg(test)]
#[path = "../tests/key_scope_tests.rs"]
mod tests;
