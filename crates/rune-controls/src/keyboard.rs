//! On-screen keyboard capability.
//!
//! Editable controls ask for the platform's virtual keyboard when they gain an
//! active touch and dismiss it when focus leaves. The platform layer injects
//! the implementation; desktop builds use [`NoKeyboard`].

pub trait VirtualKeyboard {
    fn set_visible(&mut self, visible: bool);
}

/// Keyboard for platforms without an on-screen keyboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoKeyboard;

impl VirtualKeyboard for NoKeyboard {
    fn set_visible(&mut self, _visible: bool) {}
}
