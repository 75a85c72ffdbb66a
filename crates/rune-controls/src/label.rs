use engine_core::{Rect, SpriteBatch};
use rune_config::Properties;

use crate::control::{Control, ControlBase};
use crate::theme::Style;

/// A control that displays a single piece of text.
pub struct Label {
    base: ControlBase,
    text: String,
}

impl Label {
    pub fn create(id: impl Into<String>, style: Style) -> Self {
        Self {
            base: ControlBase::new(id, style),
            text: String::new(),
        }
    }

    /// Build from a property set: the base properties plus `text`.
    pub fn create_from_properties(style: Style, properties: &Properties) -> Self {
        let mut label = Self::create("", style);
        label.initialize(properties);
        label
    }

    pub fn initialize(&mut self, properties: &Properties) {
        self.base.initialize(properties);
        match properties.get_string("text") {
            Ok(Some(text)) => self.text = text.to_string(),
            Ok(None) => {}
            Err(e) => tracing::error!(control = %self.base.id(), "{e}"),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.base.mark_dirty();
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Draw `text` with this control's font, colour and layout.
    pub(crate) fn draw_string(&self, batch: &mut dyn SpriteBatch, text: &str) {
        if text.is_empty() {
            return;
        }
        let state = self.base.state();
        let style = self.base.style();
        let color = style.text_color(state).with_opacity(self.base.opacity());
        style.font(state).draw_text(
            batch,
            text,
            &self.base.text_frame(),
            color,
            self.base.viewport_clip_bounds(),
        );
    }
}

impl Control for Label {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "label"
    }

    fn draw_text(&self, batch: &mut dyn SpriteBatch, _clip: Rect) {
        self.draw_string(batch, &self.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{Painter, Viewport, MonospaceFont};
    use std::sync::Arc;

    #[test]
    fn test_label_from_properties_draws_glyphs() {
        let props = Properties::from_toml_str("id = \"title\"\ntext = \"Hi there\"\nbounds = [0, 0, 200, 20]").unwrap();
        let mut label = Label::create_from_properties(Style::new(Arc::new(MonospaceFont::default())), &props);
        assert_eq!(label.id(), "title");
        assert_eq!(label.type_name(), "label");

        let mut painter = Painter::begin_frame(Viewport { width: 200, height: 20 });
        label.draw(&mut painter, Rect::new(0.0, 0.0, 200.0, 20.0));
        // The space has no glyph sprite.
        assert_eq!(painter.display_list().sprites().count(), 7);
        assert!(!label.is_dirty());
    }
}
