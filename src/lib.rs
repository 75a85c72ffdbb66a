//! Rune UI controls.
//!
//! Umbrella crate over the workspace: geometry, fonts and sprite recording
//! ([`engine_core`]), configuration ([`rune_config`]) and the controls
//! themselves ([`rune_controls`]).

pub use engine_core;
pub use rune_config;
pub use rune_controls;

pub use rune_controls::{Control, TextBox};
