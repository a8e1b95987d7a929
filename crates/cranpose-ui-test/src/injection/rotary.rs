use crate::coordinates::CoordinateMapper;
use crate::dispatcher::InputDispatcher;
use crate::error::Result;

/// Rotary input, such as a watch crown.
pub struct RotaryInjectionScope<'a> {
    dispatcher: &'a mut InputDispatcher,
    mapper: &'a dyn CoordinateMapper,
}

impl_injection_scope!(RotaryInjectionScope);

impl<'a> RotaryInjectionScope<'a> {
    pub fn new(dispatcher: &'a mut InputDispatcher, mapper: &'a dyn CoordinateMapper) -> Self {
        Self { dispatcher, mapper }
    }

    pub fn rotate_to_scroll_horizontally(&mut self, pixels: f32) -> Result<()> {
        self.dispatcher.enqueue_rotary_scroll_horizontally(pixels);
        Ok(())
    }

    pub fn rotate_to_scroll_vertically(&mut self, pixels: f32) -> Result<()> {
        self.dispatcher.enqueue_rotary_scroll_vertically(pixels);
        Ok(())
    }
}
