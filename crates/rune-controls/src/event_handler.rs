//! Input events delivered to controls.
//!
//! The dispatcher (a container or the window loop) translates platform input
//! into [`TouchEvent`]s and [`KeyEvent`]s and hands them to a control, which
//! answers with an [`EventResult`] saying whether the event should stop
//! propagating.

/// Result of an event handling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled and should not propagate
    Handled,
    /// Event was not handled, continue propagation
    Ignored,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Handled)
    }
}

impl From<bool> for EventResult {
    fn from(consumed: bool) -> Self {
        if consumed {
            EventResult::Handled
        } else {
            EventResult::Ignored
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Press,
    Move,
    Release,
}

/// Touch (or emulated mouse) event in control-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchKind,
    pub x: f32,
    pub y: f32,
    /// Contact index for multi-touch sources; mice always report 0.
    pub contact: u32,
}

impl TouchEvent {
    pub fn new(kind: TouchKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            contact: 0,
        }
    }

    pub fn press(x: f32, y: f32) -> Self {
        Self::new(TouchKind::Press, x, y)
    }

    pub fn move_to(x: f32, y: f32) -> Self {
        Self::new(TouchKind::Move, x, y)
    }

    pub fn release(x: f32, y: f32) -> Self {
        Self::new(TouchKind::Release, x, y)
    }

    /// The same event with coordinates relative to `origin`.
    pub fn relative_to(self, origin: [f32; 2]) -> Self {
        Self {
            x: self.x - origin[0],
            y: self.y - origin[1],
            ..self
        }
    }
}

/// Keys controls care about. Printable input arrives as `Char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Ctrl,
    Shift,
    Alt,
    Home,
    End,
    Delete,
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Backspace,
    Return,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Physical key went down.
    Press,
    /// Text input produced by a key (including backspace/return/escape/tab).
    Char,
    /// Physical key went up.
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyKind,
    pub key: Key,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self {
            kind: KeyKind::Press,
            key,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            kind: KeyKind::Release,
            key,
        }
    }

    /// Text input event. ASCII control characters map to their named keys.
    pub fn char(c: char) -> Self {
        let key = match c {
            '\u{8}' => Key::Backspace,
            '\u{7f}' => Key::Delete,
            '\r' | '\n' => Key::Return,
            '\u{1b}' => Key::Escape,
            '\t' => Key::Tab,
            c => Key::Char(c),
        };
        Self {
            kind: KeyKind::Char,
            key,
        }
    }
}

/// Either kind of input, for dispatchers that route a single stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Touch(TouchEvent),
    Key(KeyEvent),
}

impl From<TouchEvent> for InputEvent {
    fn from(e: TouchEvent) -> Self {
        InputEvent::Touch(e)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(e: KeyEvent) -> Self {
        InputEvent::Key(e)
    }
}
