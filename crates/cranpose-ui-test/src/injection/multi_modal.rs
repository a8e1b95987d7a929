use super::{KeyInjectionScope, MouseInjectionScope, RotaryInjectionScope, TouchInjectionScope};
use crate::coordinates::CoordinateMapper;
use crate::dispatcher::InputDispatcher;

/// Gives access to every modality against the same dispatcher and node.
///
/// Switching modality mid gesture follows the dispatcher's rules: mouse
/// input cancels a touch gesture and a touch down cancels pressed mouse
/// buttons.
pub struct MultiModalInjectionScope<'a> {
    dispatcher: &'a mut InputDispatcher,
    mapper: &'a dyn CoordinateMapper,
}

impl_injection_scope!(MultiModalInjectionScope);

impl<'a> MultiModalInjectionScope<'a> {
    pub fn new(dispatcher: &'a mut InputDispatcher, mapper: &'a dyn CoordinateMapper) -> Self {
        Self { dispatcher, mapper }
    }

    pub fn touch(&mut self) -> TouchInjectionScope<'_> {
        TouchInjectionScope::new(&mut *self.dispatcher, self.mapper)
    }

    pub fn mouse(&mut self) -> MouseInjectionScope<'_> {
        MouseInjectionScope::new(&mut *self.dispatcher, self.mapper)
    }

    pub fn key(&mut self) -> KeyInjectionScope<'_> {
        KeyInjectionScope::new(&mut *self.dispatcher, self.mapper)
    }

    pub fn rotary(&mut self) -> RotaryInjectionScope<'_> {
        RotaryInjectionScope::new(&mut *self.dispatcher, self.mapper)
    }
}
