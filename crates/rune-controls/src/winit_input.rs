//! Translate winit window events into control input.
//!
//! The left mouse button emulates a single touch contact: press/release map to
//! touch press/release and cursor motion while held maps to touch move.

use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::event_handler::{InputEvent, Key, KeyEvent, KeyKind, TouchEvent};

/// Map a physical key to a control key. Character keys are delivered via text input.
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Ctrl,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::ArrowLeft => Key::LeftArrow,
        KeyCode::ArrowRight => Key::RightArrow,
        KeyCode::ArrowUp => Key::UpArrow,
        KeyCode::ArrowDown => Key::DownArrow,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Return,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    };
    Some(key)
}

/// Stateful translator; tracks the cursor so button events get a position.
#[derive(Debug, Default)]
pub struct InputTranslator {
    cursor: [f32; 2],
    pressed: bool,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position in window pixels.
    pub fn cursor(&self) -> [f32; 2] {
        self.cursor
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Vec<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => self
                .on_cursor_moved([position.x as f32, position.y as f32])
                .into_iter()
                .collect(),
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(*state, *button).into_iter().collect()
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => key_from_code(code),
                    PhysicalKey::Unidentified(_) => None,
                };
                let text = event.text.as_ref().map(|t| t.as_str());
                self.on_key(event.state, key, text)
            }
            _ => Vec::new(),
        }
    }

    pub fn on_cursor_moved(&mut self, position: [f32; 2]) -> Option<InputEvent> {
        self.cursor = position;
        self.pressed
            .then(|| TouchEvent::move_to(position[0], position[1]).into())
    }

    pub fn on_mouse_button(&mut self, state: ElementState, button: MouseButton) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let [x, y] = self.cursor;
        match state {
            ElementState::Pressed => {
                self.pressed = true;
                Some(TouchEvent::press(x, y).into())
            }
            ElementState::Released => {
                self.pressed = false;
                Some(TouchEvent::release(x, y).into())
            }
        }
    }

    /// A key press yields the press plus any text it produced.
    pub fn on_key(&mut self, state: ElementState, key: Option<Key>, text: Option<&str>) -> Vec<InputEvent> {
        let mut out = Vec::new();
        match state {
            ElementState::Pressed => {
                if let Some(key) = key {
                    out.push(KeyEvent::press(key).into());
                }
                match key {
                    // Platforms disagree on whether these carry text; synthesize it.
                    Some(k @ (Key::Backspace | Key::Return | Key::Tab | Key::Escape)) => {
                        out.push(KeyEvent { kind: KeyKind::Char, key: k }.into());
                    }
                    _ => {
                        for c in text.unwrap_or_default().chars().filter(|c| !c.is_control()) {
                            out.push(KeyEvent::char(c).into());
                        }
                    }
                }
            }
            ElementState::Released => {
                if let Some(key) = key {
                    out.push(KeyEvent::release(key).into());
                }
            }
        }
        out
    }
}
