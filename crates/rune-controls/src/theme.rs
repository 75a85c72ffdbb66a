//! Control styles.
//!
//! A [`Style`] carries the base font plus per-state overrides. Lookups for a
//! state fall back to the `Normal` state's value, then to a built-in default,
//! so a style only has to spell out what changes between states.

use std::collections::HashMap;
use std::sync::Arc;

use engine_core::{ColorLinPremul, Font, Insets, Justify, Rect, TextureId, Uvs};

/// Theme image id used for the text caret.
pub const CARET_IMAGE: &str = "textCaret";

pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Interaction state shared by all controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ControlState {
    /// Idle.
    #[default]
    Normal,
    /// Focused, no contact in progress.
    Focus,
    /// Receiving a touch or keyboard edits.
    Active,
}

impl ControlState {
    fn slot(self) -> usize {
        match self {
            ControlState::Normal => 0,
            ControlState::Focus => 1,
            ControlState::Active => 2,
        }
    }
}

/// A region of a theme atlas drawn as a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeImage {
    pub texture: TextureId,
    /// Pixel region in the atlas; its size is the drawn size.
    pub region: Rect,
    pub uvs: Uvs,
    pub color: ColorLinPremul,
}

/// Per-state overrides. `None` falls back to the `Normal` state.
#[derive(Clone, Default)]
pub struct StateStyle {
    pub font: Option<Arc<dyn Font>>,
    pub font_size: Option<f32>,
    pub text_color: Option<ColorLinPremul>,
    pub justify: Option<Justify>,
    pub rtl: Option<bool>,
    pub opacity: Option<f32>,
    pub images: HashMap<String, ThemeImage>,
}

impl StateStyle {
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_text_color(mut self, color: ColorLinPremul) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_image(mut self, id: impl Into<String>, image: ThemeImage) -> Self {
        self.images.insert(id.into(), image);
        self
    }
}

#[derive(Clone)]
pub struct Style {
    font: Arc<dyn Font>,
    padding: Insets,
    states: [StateStyle; 3],
}

impl Style {
    pub fn new(font: Arc<dyn Font>) -> Self {
        Self {
            font,
            padding: Insets::default(),
            states: Default::default(),
        }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_state(mut self, state: ControlState, style: StateStyle) -> Self {
        self.states[state.slot()] = style;
        self
    }

    pub fn state_mut(&mut self, state: ControlState) -> &mut StateStyle {
        &mut self.states[state.slot()]
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    fn lookup<'a, T>(&'a self, state: ControlState, f: impl Fn(&'a StateStyle) -> Option<T>) -> Option<T> {
        f(&self.states[state.slot()]).or_else(|| f(&self.states[ControlState::Normal.slot()]))
    }

    pub fn font(&self, state: ControlState) -> &Arc<dyn Font> {
        self.lookup(state, |s| s.font.as_ref()).unwrap_or(&self.font)
    }

    pub fn font_size(&self, state: ControlState) -> f32 {
        self.lookup(state, |s| s.font_size).unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn text_color(&self, state: ControlState) -> ColorLinPremul {
        self.lookup(state, |s| s.text_color).unwrap_or(ColorLinPremul::WHITE)
    }

    pub fn justify(&self, state: ControlState) -> Justify {
        self.lookup(state, |s| s.justify).unwrap_or_default()
    }

    pub fn rtl(&self, state: ControlState) -> bool {
        self.lookup(state, |s| s.rtl).unwrap_or(false)
    }

    pub fn opacity(&self, state: ControlState) -> f32 {
        self.lookup(state, |s| s.opacity).unwrap_or(1.0)
    }

    pub fn image(&self, id: &str, state: ControlState) -> Option<&ThemeImage> {
        self.lookup(state, |s| s.images.get(id))
    }
}
