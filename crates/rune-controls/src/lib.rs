//! Interactive UI controls for Rune.
//!
//! Controls receive [`TouchEvent`]s and [`KeyEvent`]s from a dispatcher,
//! update their state, and draw through an [`engine_core::SpriteBatch`]. The
//! main control here is [`TextBox`], an editable single-line text field built
//! on [`Label`].

pub mod control;
pub mod editing;
pub mod error;
pub mod event_handler;
pub mod input_mode;
pub mod keyboard;
pub mod label;
pub mod listener;
pub mod text_box;
pub mod theme;
pub mod winit_input;

pub use control::{Control, ControlBase};
pub use error::{ControlError, Result};
pub use event_handler::{EventResult, InputEvent, Key, KeyEvent, KeyKind, TouchEvent, TouchKind};
pub use input_mode::InputMode;
pub use keyboard::{NoKeyboard, VirtualKeyboard};
pub use label::Label;
pub use listener::{ControlEvent, ControlListener, ListenerHandle, ListenerSet};
pub use text_box::{DEFAULT_PASSWORD_CHAR, TextBox};
pub use theme::{CARET_IMAGE, ControlState, StateStyle, Style, ThemeImage};
pub use winit_input::InputTranslator;
