//! Single-line editable text control.
//!
//! The caret is kept as a location in window pixels; its character index is
//! recovered from the font whenever an edit needs it. Pointer input places
//! the caret by location and keyboard input moves it by index.
//!
//! Text never scrolls: an insertion that would make the text overflow the
//! layout area is undone.

use std::borrow::Cow;

use engine_core::{Rect, Sprite, SpriteBatch};
use rune_config::{ControlsConfig, Properties};

use crate::control::{Control, ControlBase};
use crate::editing::{char_count, insert_char, next_word_boundary, prev_word_boundary, remove_char};
use crate::error::{ControlError, Result};
use crate::event_handler::{EventResult, Key, KeyEvent, KeyKind, TouchEvent, TouchKind};
use crate::input_mode::InputMode;
use crate::keyboard::{NoKeyboard, VirtualKeyboard};
use crate::label::Label;
use crate::listener::{ControlEvent, ListenerHandle};
use crate::theme::{CARET_IMAGE, ControlState, Style, ThemeImage};

pub const DEFAULT_PASSWORD_CHAR: char = '*';

/// What a key handler wants reported back to the dispatcher.
enum KeyFlow {
    /// Report per the consume-input-events policy.
    Done,
    /// Let the event continue (tab focus traversal).
    PassOn,
}

pub struct TextBox {
    label: Label,
    input_mode: InputMode,
    password_char: char,
    caret_location: [f32; 2],
    /// Word navigation modifier (Ctrl) is down.
    modifier_held: bool,
    last_key: Option<Key>,
    font_size: f32,
    caret_image: Option<ThemeImage>,
    keyboard: Box<dyn VirtualKeyboard>,
}

impl TextBox {
    pub fn create(id: impl Into<String>, style: Style) -> Self {
        let label = Label::create(id, style);
        let font_size = label.base().style().font_size(ControlState::Normal);
        Self {
            label,
            input_mode: InputMode::Text,
            password_char: DEFAULT_PASSWORD_CHAR,
            caret_location: [0.0, 0.0],
            modifier_held: false,
            last_key: None,
            font_size,
            caret_image: None,
            keyboard: Box::new(NoKeyboard),
        }
    }

    /// Build from a property set; see [`TextBox::initialize`].
    pub fn create_from_properties(style: Style, properties: &Properties) -> Self {
        let mut text_box = Self::create("", style);
        text_box.initialize(properties);
        text_box
    }

    /// Apply a property set. Besides the label properties this reads
    /// `inputMode` (`"TEXT"` or `"PASSWORD"`) and `passwordChar`; bad values
    /// are logged and leave the current setting in place, except an unknown
    /// input mode which selects `Text`.
    pub fn initialize(&mut self, properties: &Properties) {
        self.label.initialize(properties);

        let token = match properties.get_string("inputMode") {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(control = %self.id(), "{e}");
                None
            }
        };
        self.input_mode = InputMode::parse(token);

        match properties.get_char("passwordChar") {
            Ok(Some(c)) => self.password_char = c,
            Ok(None) => {}
            Err(e) => tracing::error!(control = %self.id(), "{e}"),
        }
    }

    /// Route show/hide requests for the on-screen keyboard to `keyboard`.
    pub fn with_keyboard(mut self, keyboard: Box<dyn VirtualKeyboard>) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Apply application-wide control defaults.
    pub fn apply_config(&mut self, config: &ControlsConfig) {
        self.password_char = config.password_char;
        self.label.base_mut().set_consume_input_events(config.consume_input_events);
    }

    pub fn text(&self) -> &str {
        self.label.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label.set_text(text);
    }

    pub fn password_char(&self) -> char {
        self.password_char
    }

    pub fn set_password_char(&mut self, c: char) {
        self.password_char = c;
        self.label.base_mut().mark_dirty();
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.label.base_mut().mark_dirty();
    }

    /// Key of the most recent key event, whatever it did.
    pub fn last_key(&self) -> Option<Key> {
        self.last_key
    }

    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    /// Caret location in window pixels (top of the caret's line).
    pub fn caret_location(&self) -> [f32; 2] {
        self.caret_location
    }

    /// Character index under the caret, or 0 when the caret doesn't resolve.
    pub fn caret_index(&self) -> usize {
        self.index_at(self.caret_location).map_or(0, |(i, _)| i)
    }

    /// The text as measured and drawn: the buffer, or one mask character per
    /// buffer character in password mode.
    pub fn displayed_text(&self) -> Cow<'_, str> {
        self.input_mode.display(self.label.text(), self.password_char)
    }

    fn index_at(&self, location: [f32; 2]) -> Option<(usize, [f32; 2])> {
        let base = self.base();
        let font = base.style().font(base.state());
        font.index_at_location(&self.displayed_text(), &base.text_frame(), location)
    }

    fn location_of(&self, index: usize) -> Option<[f32; 2]> {
        let base = self.base();
        let font = base.style().font(base.state());
        font.location_at_index(&self.displayed_text(), &base.text_frame(), index)
    }

    fn measure(&self) -> Rect {
        let base = self.base();
        let font = base.style().font(base.state());
        font.measure_text(&self.displayed_text(), &base.text_frame())
    }

    fn current_font_size(&self) -> f32 {
        let base = self.base();
        base.style().font_size(base.state())
    }

    fn move_caret_to(&mut self, index: usize) {
        if let Some(location) = self.location_of(index) {
            self.caret_location = location;
        }
    }

    /// Index under the caret, snapping the caret onto it. Unresolvable carets
    /// go to the start of the text.
    fn resolve_index(&mut self) -> usize {
        match self.index_at(self.caret_location) {
            Some((index, location)) => {
                self.caret_location = location;
                index
            }
            None => {
                self.move_caret_to(0);
                0
            }
        }
    }

    /// Place the caret nearest a control-local point.
    ///
    /// Points past the end of the text snap to the end; other misses are
    /// clamped into the measured text box and retried. If that still misses,
    /// the caret stays where it was.
    pub fn set_caret_location(&mut self, x: f32, y: f32) {
        let previous = self.caret_location;
        let origin = self.base().absolute_bounds();
        let mut location = [x + origin.x, y + origin.y];

        if let Some((_, snapped)) = self.index_at(location) {
            self.caret_location = snapped;
            return;
        }

        let measured = self.measure();
        if location[0] > measured.right() && location[1] > measured.bottom() {
            self.move_caret_to(char_count(self.label.text()));
            return;
        }

        if location[0] < measured.x {
            location[0] = measured.x;
        } else if location[0] > measured.right() {
            location[0] = measured.right();
        }
        if location[1] < measured.y {
            location[1] = measured.y;
        } else if location[1] > measured.bottom() {
            location[1] = measured.bottom() - self.current_font_size();
        }

        self.caret_location = match self.index_at(location) {
            Some((_, snapped)) => snapped,
            None => {
                tracing::trace!(control = %self.id(), x, y, "caret location unresolved");
                previous
            }
        };
    }

    fn notify_text_changed(&mut self) {
        let base = self.label.base_mut();
        base.mark_dirty();
        base.notify_listeners(ControlEvent::TextChanged);
    }

    fn key_press(&mut self, key: Key) -> KeyFlow {
        match key {
            Key::Ctrl => self.modifier_held = true,
            Key::Home => {
                self.move_caret_to(0);
                self.label.base_mut().mark_dirty();
            }
            Key::End => {
                self.move_caret_to(char_count(self.label.text()));
                self.label.base_mut().mark_dirty();
            }
            Key::Delete => {
                let index = self.resolve_index();
                if remove_char(self.label.text_mut(), index).is_some() {
                    self.move_caret_to(index);
                    self.notify_text_changed();
                }
            }
            Key::Tab => return KeyFlow::PassOn,
            Key::LeftArrow | Key::RightArrow => {
                let index = self.resolve_index();
                let target = {
                    let shown = self.displayed_text();
                    match (key, self.modifier_held) {
                        (Key::LeftArrow, true) => prev_word_boundary(&shown, index),
                        (Key::LeftArrow, false) => index.saturating_sub(1),
                        (_, true) => next_word_boundary(&shown, index),
                        (_, false) => (index + 1).min(char_count(&shown)),
                    }
                };
                self.move_caret_to(target);
                self.label.base_mut().mark_dirty();
            }
            Key::UpArrow | Key::DownArrow => {
                let previous = self.caret_location;
                let step = self.current_font_size();
                let mut moved = previous;
                moved[1] += if key == Key::UpArrow { -step } else { step };
                self.caret_location = match self.index_at(moved) {
                    Some((_, snapped)) => snapped,
                    None => previous,
                };
                self.label.base_mut().mark_dirty();
            }
            _ => {}
        }
        KeyFlow::Done
    }

    fn key_char(&mut self, key: Key) -> KeyFlow {
        match key {
            Key::Tab => return KeyFlow::PassOn,
            Key::Backspace => {
                let index = self.resolve_index();
                if index > 0 {
                    remove_char(self.label.text_mut(), index - 1);
                    self.move_caret_to(index - 1);
                    self.notify_text_changed();
                }
            }
            // Line breaks are not supported.
            Key::Return | Key::Escape => {}
            Key::Char(c) => self.insert(c),
            _ => {}
        }
        KeyFlow::Done
    }

    fn insert(&mut self, c: char) {
        let index = self.resolve_index();
        insert_char(self.label.text_mut(), index, c);
        self.move_caret_to(index + 1);

        let area = self.base().text_bounds();
        let fits = if c == ' '
            && (self.caret_location[0] >= area.right() || self.caret_location[1] >= area.bottom())
        {
            false
        } else {
            let measured = self.measure();
            !(measured.x < area.x
                || measured.y < area.y
                || measured.w >= area.w
                || measured.h >= area.h)
        };

        if fits {
            self.notify_text_changed();
        } else {
            remove_char(self.label.text_mut(), index);
            self.move_caret_to(index);
            tracing::debug!(control = %self.id(), ?c, "insertion would overflow; undone");
        }
    }
}

impl Control for TextBox {
    fn base(&self) -> &ControlBase {
        self.label.base()
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        self.label.base_mut()
    }

    fn type_name(&self) -> &'static str {
        "textBox"
    }

    fn touch_event(&mut self, event: TouchEvent) -> EventResult {
        let inside = self.base().contains(event.x, event.y);
        match event.kind {
            TouchKind::Press => {
                if !inside {
                    let base = self.label.base_mut();
                    base.set_contact(None);
                    base.set_state(ControlState::Normal);
                    base.mark_dirty();
                    self.keyboard.set_visible(false);
                    return EventResult::Ignored;
                }
                self.label.base_mut().set_contact(Some(event.contact));
                if self.state() == ControlState::Normal {
                    self.keyboard.set_visible(true);
                }
                self.set_caret_location(event.x, event.y);
                let base = self.label.base_mut();
                base.set_state(ControlState::Active);
                base.mark_dirty();
            }
            TouchKind::Move => {
                if self.state() == ControlState::Active && inside {
                    self.set_caret_location(event.x, event.y);
                    self.label.base_mut().mark_dirty();
                }
            }
            TouchKind::Release => {
                if inside {
                    self.set_caret_location(event.x, event.y);
                    self.label.base_mut().set_state(ControlState::Focus);
                } else {
                    self.label.base_mut().set_state(ControlState::Normal);
                    self.keyboard.set_visible(false);
                }
                let base = self.label.base_mut();
                base.set_contact(None);
                base.mark_dirty();
            }
        }
        self.base().consumed()
    }

    fn key_event(&mut self, event: KeyEvent) -> EventResult {
        let flow = match event.kind {
            KeyKind::Press => self.key_press(event.key),
            KeyKind::Char => self.key_char(event.key),
            KeyKind::Release => {
                if event.key == Key::Ctrl {
                    self.modifier_held = false;
                }
                KeyFlow::Done
            }
        };
        self.last_key = Some(event.key);
        match flow {
            KeyFlow::Done => self.base().consumed(),
            KeyFlow::PassOn => EventResult::Ignored,
        }
    }

    /// Text boxes never emit `ValueChanged`; the other requested events are
    /// still registered.
    fn add_listener(&mut self, listener: ListenerHandle, events: &[ControlEvent]) -> Result<()> {
        let supported: Vec<ControlEvent> = events
            .iter()
            .copied()
            .filter(|e| *e != ControlEvent::ValueChanged)
            .collect();
        self.label.base_mut().add_listener(listener, &supported);
        if supported.len() == events.len() {
            return Ok(());
        }
        let err = ControlError::UnsupportedEvent {
            control: self.type_name(),
            event: ControlEvent::ValueChanged,
        };
        tracing::error!(control = %self.id(), "{err}");
        Err(err)
    }

    fn update(&mut self, container_clip: Rect, offset: [f32; 2]) {
        self.label.base_mut().update(container_clip, offset);
        let base = self.label.base();
        let state = base.state();
        self.font_size = base.style().font_size(state);
        self.caret_image = base.style().image(CARET_IMAGE, state).copied();
    }

    /// Draw the caret while the box is active or focused.
    fn draw_images(&mut self, batch: &mut dyn SpriteBatch, clip: Rect) {
        let visible = self.state() == ControlState::Active || self.base().has_focus();
        if let Some(image) = self.caret_image.filter(|i| visible && !i.region.is_empty()) {
            let [x, y] = self.caret_location;
            batch.draw(Sprite {
                texture: image.texture,
                dst: Rect::new(x - image.region.w / 2.0, y, image.region.w, self.font_size),
                uvs: image.uvs,
                color: image.color.with_opacity(self.base().opacity()),
                clip,
            });
        }
        self.label.base_mut().clear_dirty();
    }

    fn draw_text(&self, batch: &mut dyn SpriteBatch, _clip: Rect) {
        self.label.draw_string(batch, &self.displayed_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{Insets, MonospaceFont};
    use std::sync::Arc;

    fn text_box(text: &str) -> TextBox {
        // 8px advance at the default 16px size.
        let style = Style::new(Arc::new(MonospaceFont::default()));
        let mut tb = TextBox::create("tb", style);
        tb.base_mut().set_bounds(Rect::new(0.0, 0.0, 200.0, 40.0));
        tb.set_text(text);
        tb
    }

    #[test]
    fn test_touch_places_caret_between_chars() {
        let mut tb = text_box("hello");
        tb.touch_event(TouchEvent::press(17.0, 5.0));
        assert_eq!(tb.caret_index(), 2);
        assert_eq!(tb.caret_location(), [16.0, 0.0]);
    }

    #[test]
    fn test_touch_past_text_snaps_to_end() {
        let mut tb = text_box("hello");
        tb.touch_event(TouchEvent::press(150.0, 30.0));
        assert_eq!(tb.caret_index(), 5);
        assert_eq!(tb.caret_location(), [40.0, 0.0]);
    }

    #[test]
    fn test_touch_beside_text_clamps_horizontally() {
        let mut tb = text_box("hello");
        // Right of the text but on its line.
        tb.touch_event(TouchEvent::press(150.0, 8.0));
        assert_eq!(tb.caret_index(), 5);
    }

    #[test]
    fn test_offset_moves_caret_into_window_space() {
        let mut tb = text_box("hello");
        tb.update(Rect::new(0.0, 0.0, 800.0, 600.0), [100.0, 50.0]);
        tb.touch_event(TouchEvent::press(9.0, 5.0));
        assert_eq!(tb.caret_location(), [108.0, 50.0]);
        assert_eq!(tb.caret_index(), 1);
    }

    #[test]
    fn test_point_below_text_clamps_to_last_line() {
        let mut tb = text_box("hello");
        tb.set_caret_location(9.0, 60.0);
        assert_eq!(tb.caret_index(), 1);
        assert_eq!(tb.caret_location(), [8.0, 0.0]);
    }

    #[test]
    fn test_unresolvable_point_keeps_previous_caret() {
        let style = Style::new(Arc::new(MonospaceFont::default()));
        let mut tb = TextBox::create("tb", style);
        // "hello " on the first line, "world" on the second.
        tb.base_mut().set_bounds(Rect::new(0.0, 0.0, 50.0, 100.0));
        tb.set_text("hello world");
        tb.set_caret_location(9.0, 5.0);
        assert_eq!(tb.caret_location(), [8.0, 0.0]);

        // Clamped into the measured box but past the end of the short line.
        tb.set_caret_location(45.0, 20.0);
        assert_eq!(tb.caret_location(), [8.0, 0.0]);
        assert_eq!(tb.caret_index(), 1);
    }

    #[test]
    fn test_plain_arrows_move_one_char() {
        let mut tb = text_box("abc");
        tb.key_event(KeyEvent::press(Key::End));
        assert_eq!(tb.caret_index(), 3);
        tb.key_event(KeyEvent::press(Key::RightArrow));
        assert_eq!(tb.caret_index(), 3);
        tb.key_event(KeyEvent::press(Key::LeftArrow));
        assert_eq!(tb.caret_index(), 2);
    }

    #[test]
    fn test_ctrl_right_skips_to_next_space() {
        let mut tb = text_box("hello world again");
        tb.key_event(KeyEvent::press(Key::Home));
        tb.key_event(KeyEvent::press(Key::Ctrl));
        tb.key_event(KeyEvent::press(Key::RightArrow));
        assert_eq!(tb.caret_index(), 5);
        tb.key_event(KeyEvent::press(Key::RightArrow));
        assert_eq!(tb.caret_index(), 11);
        tb.key_event(KeyEvent::release(Key::Ctrl));
        assert!(!tb.modifier_held());
        tb.key_event(KeyEvent::press(Key::RightArrow));
        assert_eq!(tb.caret_index(), 12);
    }

    #[test]
    fn test_delete_and_backspace() {
        let mut tb = text_box("abcd");
        tb.key_event(KeyEvent::press(Key::Home));
        tb.key_event(KeyEvent::press(Key::RightArrow));
        tb.key_event(KeyEvent::press(Key::Delete));
        assert_eq!(tb.text(), "acd");
        assert_eq!(tb.caret_index(), 1);

        tb.key_event(KeyEvent::char('\u{8}'));
        assert_eq!(tb.text(), "cd");
        assert_eq!(tb.caret_index(), 0);

        // Nothing before the caret.
        tb.key_event(KeyEvent::char('\u{8}'));
        assert_eq!(tb.text(), "cd");

        tb.key_event(KeyEvent::press(Key::End));
        tb.key_event(KeyEvent::press(Key::Delete));
        assert_eq!(tb.text(), "cd");

        // DEL text accompanies the delete key press; it never erases backwards.
        tb.key_event(KeyEvent::char('\u{7f}'));
        assert_eq!(tb.text(), "cd");
    }

    #[test]
    fn test_up_down_move_between_lines() {
        let style = Style::new(Arc::new(MonospaceFont::default()));
        let mut tb = TextBox::create("tb", style);
        // Wide enough for "hello " on the first line only.
        tb.base_mut().set_bounds(Rect::new(0.0, 0.0, 50.0, 100.0));
        tb.set_text("hello world");
        tb.key_event(KeyEvent::press(Key::Home));
        assert_eq!(tb.caret_location(), [0.0, 0.0]);

        tb.key_event(KeyEvent::press(Key::DownArrow));
        assert_eq!(tb.caret_location(), [0.0, 16.0]);
        assert_eq!(tb.caret_index(), 6);

        // No third line: the caret stays put.
        tb.key_event(KeyEvent::press(Key::DownArrow));
        assert_eq!(tb.caret_location(), [0.0, 16.0]);

        tb.key_event(KeyEvent::press(Key::UpArrow));
        assert_eq!(tb.caret_index(), 0);
    }

    #[test]
    fn test_space_at_right_edge_is_undone() {
        let mut tb = text_box("");
        tb.base_mut().set_bounds(Rect::new(0.0, 0.0, 40.0, 40.0));
        for c in "abcd".chars() {
            tb.key_event(KeyEvent::char(c));
        }
        assert_eq!(tb.text(), "abcd");
        tb.base_mut().clear_dirty();

        // The caret after the space would sit on the right edge.
        tb.key_event(KeyEvent::char(' '));
        assert_eq!(tb.text(), "abcd");
        assert_eq!(tb.caret_index(), 4);
        assert!(!tb.is_dirty());
    }

    #[test]
    fn test_caret_drawn_only_when_active_or_focused() {
        use crate::theme::StateStyle;
        use engine_core::{ColorLinPremul, Painter, TextureId, Uvs, Viewport};

        let caret = ThemeImage {
            texture: TextureId(7),
            region: Rect::new(0.0, 0.0, 2.0, 16.0),
            uvs: Uvs::FULL,
            color: ColorLinPremul::WHITE,
        };
        let style = Style::new(Arc::new(MonospaceFont::default()))
            .with_padding(Insets::default())
            .with_state(ControlState::Normal, StateStyle::default().with_image(CARET_IMAGE, caret));
        let mut tb = TextBox::create("tb", style);
        tb.base_mut().set_bounds(Rect::new(0.0, 0.0, 200.0, 40.0));
        let clip = Rect::new(0.0, 0.0, 200.0, 40.0);

        tb.update(clip, [0.0, 0.0]);
        let mut painter = Painter::begin_frame(Viewport { width: 200, height: 40 });
        tb.draw_images(&mut painter, clip);
        assert_eq!(painter.display_list().sprites().count(), 0);

        tb.touch_event(TouchEvent::press(1.0, 1.0));
        tb.update(clip, [0.0, 0.0]);
        tb.draw_images(&mut painter, clip);
        let sprites: Vec<_> = painter.display_list().sprites().copied().collect();
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].dst, Rect::new(-1.0, 0.0, 2.0, 16.0));
        assert_eq!(sprites[0].texture, TextureId(7));
        assert!(!tb.is_dirty());
    }

    #[test]
    fn test_caret_fades_with_opacity_and_uses_callers_clip() {
        use crate::theme::StateStyle;
        use engine_core::{ColorLinPremul, Painter, TextureId, Uvs, Viewport};

        let caret = ThemeImage {
            texture: TextureId(7),
            region: Rect::new(0.0, 0.0, 2.0, 16.0),
            uvs: Uvs::FULL,
            color: ColorLinPremul::WHITE,
        };
        let faded = StateStyle {
            opacity: Some(0.5),
            ..StateStyle::default()
        }
        .with_image(CARET_IMAGE, caret);
        let style = Style::new(Arc::new(MonospaceFont::default()))
            .with_state(ControlState::Normal, faded);
        let mut tb = TextBox::create("tb", style);
        tb.base_mut().set_bounds(Rect::new(0.0, 0.0, 200.0, 40.0));

        tb.touch_event(TouchEvent::press(1.0, 1.0));
        tb.update(Rect::new(0.0, 0.0, 200.0, 40.0), [0.0, 0.0]);
        let clip = Rect::new(1.0, 2.0, 3.0, 4.0);
        let mut painter = Painter::begin_frame(Viewport { width: 200, height: 40 });
        tb.draw_images(&mut painter, clip);

        let sprite = painter.display_list().sprites().next().copied();
        let sprite = sprite.expect("caret sprite");
        assert_eq!(sprite.color.a, 0.5);
        assert_eq!(sprite.color.r, 0.5);
        assert_eq!(sprite.clip, clip);
    }
}
