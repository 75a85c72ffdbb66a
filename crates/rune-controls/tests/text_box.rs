use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use engine_core::{MonospaceFont, Painter, Rect, Viewport};
use rune_config::Properties;
use rune_controls::{
    Control, ControlError, ControlEvent, ControlListener, ControlState, EventResult, InputMode,
    Key, KeyEvent, ListenerHandle, Style, TextBox, TouchEvent, VirtualKeyboard,
};

/// 8px glyphs at the default 16px size in a 200x40 box: 24 characters fit.
fn text_box() -> TextBox {
    let mut tb = TextBox::create("field", Style::new(Arc::new(MonospaceFont::default())));
    tb.base_mut().set_bounds(Rect::new(0.0, 0.0, 200.0, 40.0));
    tb
}

fn type_str(tb: &mut TextBox, s: &str) {
    for c in s.chars() {
        tb.key_event(KeyEvent::char(c));
    }
}

struct KeyboardRecorder(Rc<RefCell<Vec<bool>>>);

impl VirtualKeyboard for KeyboardRecorder {
    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().push(visible);
    }
}

struct EventRecorder(Rc<RefCell<Vec<(String, ControlEvent)>>>);

impl ControlListener for EventRecorder {
    fn control_event(&mut self, control_id: &str, event: ControlEvent) {
        self.0.borrow_mut().push((control_id.to_string(), event));
    }
}

#[test]
fn password_mode_masks_displayed_text() {
    let mut tb = text_box();
    tb.set_input_mode(InputMode::Password);
    tb.set_password_char('#');
    tb.set_text("pw12");

    assert_eq!(tb.displayed_text(), "####");
    assert_eq!(tb.text(), "pw12");

    type_str(&mut tb, "xyz");
    let shown = tb.displayed_text();
    assert_eq!(shown.chars().count(), tb.text().chars().count());
    assert!(shown.chars().all(|c| c == '#'));
}

#[test]
fn password_mode_draws_mask_glyphs() {
    let mut tb = text_box();
    tb.set_input_mode(InputMode::Password);
    tb.set_text("ab cd");
    let clip = Rect::new(0.0, 0.0, 200.0, 40.0);
    tb.update(clip, [0.0, 0.0]);

    let mut painter = Painter::begin_frame(Viewport { width: 200, height: 40 });
    tb.draw(&mut painter, clip);
    // The space is masked too, so every character gets a glyph.
    assert_eq!(painter.finish().sprites().count(), 5);
}

#[test]
fn home_then_left_does_not_underflow() {
    let mut tb = text_box();
    tb.set_text("abc");
    tb.key_event(KeyEvent::press(Key::Home));
    tb.key_event(KeyEvent::press(Key::LeftArrow));
    assert_eq!(tb.caret_index(), 0);
    tb.key_event(KeyEvent::press(Key::LeftArrow));
    assert_eq!(tb.caret_index(), 0);
}

#[test]
fn insertion_that_overflows_is_rejected() {
    let mut tb = text_box();
    type_str(&mut tb, &"x".repeat(24));
    assert_eq!(tb.text().len(), 24);

    tb.base_mut().clear_dirty();
    tb.key_event(KeyEvent::char('y'));
    assert_eq!(tb.text(), "x".repeat(24));
    assert_eq!(tb.caret_index(), 24);
    assert!(!tb.is_dirty());
}

#[test]
fn buffer_length_tracks_insertions_and_deletions() {
    let mut tb = text_box();
    type_str(&mut tb, "hello there");
    tb.key_event(KeyEvent::char('\u{8}'));
    tb.key_event(KeyEvent::char('\u{8}'));
    tb.key_event(KeyEvent::press(Key::Home));
    tb.key_event(KeyEvent::press(Key::Delete));
    assert_eq!(tb.text(), "ello the");
    assert_eq!(tb.text().chars().count(), 11 - 3);
}

#[test]
fn inserting_at_start_each_time_reverses() {
    let mut tb = text_box();
    for c in ['a', 'b', 'c'] {
        tb.key_event(KeyEvent::press(Key::Home));
        tb.key_event(KeyEvent::char(c));
    }
    assert_eq!(tb.text(), "cba");
    // The caret follows the last inserted character.
    assert_eq!(tb.caret_index(), 1);
    tb.key_event(KeyEvent::press(Key::End));
    assert_eq!(tb.caret_index(), 3);
}

#[test]
fn ctrl_left_jumps_to_previous_word() {
    let mut tb = text_box();
    tb.set_text("hello world");
    tb.key_event(KeyEvent::press(Key::Home));
    for _ in 0..6 {
        tb.key_event(KeyEvent::press(Key::RightArrow));
    }
    assert_eq!(tb.caret_index(), 6);

    tb.key_event(KeyEvent::press(Key::Ctrl));
    assert!(tb.modifier_held());
    tb.key_event(KeyEvent::press(Key::LeftArrow));
    assert_eq!(tb.caret_index(), 0);
}

#[test]
fn press_outside_hides_keyboard_and_propagates() {
    let shown = Rc::new(RefCell::new(Vec::new()));
    let mut tb = text_box().with_keyboard(Box::new(KeyboardRecorder(shown.clone())));

    assert_eq!(tb.touch_event(TouchEvent::press(10.0, 10.0)), EventResult::Handled);
    assert_eq!(tb.state(), ControlState::Active);
    assert_eq!(tb.touch_event(TouchEvent::release(10.0, 10.0)), EventResult::Handled);
    assert_eq!(tb.state(), ControlState::Focus);
    // Already focused: no second show request.
    tb.touch_event(TouchEvent::press(12.0, 10.0));
    tb.touch_event(TouchEvent::release(12.0, 10.0));

    tb.base_mut().clear_dirty();
    assert_eq!(tb.touch_event(TouchEvent::press(300.0, 10.0)), EventResult::Ignored);
    assert_eq!(tb.state(), ControlState::Normal);
    assert!(tb.is_dirty());
    assert_eq!(*shown.borrow(), vec![true, false]);
}

#[test]
fn touch_on_lower_edge_misses() {
    let mut tb = text_box();
    assert_eq!(tb.touch_event(TouchEvent::press(0.0, 10.0)), EventResult::Ignored);
    assert_eq!(tb.touch_event(TouchEvent::press(200.0, 40.0)), EventResult::Handled);
}

#[test]
fn move_only_tracks_while_active() {
    let mut tb = text_box();
    tb.set_text("hello");
    tb.touch_event(TouchEvent::move_to(17.0, 5.0));
    assert_eq!(tb.caret_location(), [0.0, 0.0]);

    tb.touch_event(TouchEvent::press(1.0, 5.0));
    tb.touch_event(TouchEvent::move_to(17.0, 5.0));
    assert_eq!(tb.caret_index(), 2);
    tb.touch_event(TouchEvent::release(300.0, 5.0));
    assert_eq!(tb.state(), ControlState::Normal);
    assert_eq!(tb.caret_index(), 2);
}

#[test]
fn tab_is_not_consumed_but_recorded() {
    let mut tb = text_box();
    assert_eq!(tb.key_event(KeyEvent::press(Key::Tab)), EventResult::Ignored);
    assert_eq!(tb.last_key(), Some(Key::Tab));
    assert_eq!(tb.key_event(KeyEvent::char('\t')), EventResult::Ignored);

    assert_eq!(tb.key_event(KeyEvent::char('q')), EventResult::Handled);
    assert_eq!(tb.last_key(), Some(Key::Char('q')));
    tb.key_event(KeyEvent::release(Key::Shift));
    assert_eq!(tb.last_key(), Some(Key::Shift));

    // Return inserts nothing.
    tb.key_event(KeyEvent::char('\r'));
    assert_eq!(tb.text(), "q");
}

#[test]
fn text_changed_fires_on_successful_edits_only() -> Result<()> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let listener: ListenerHandle = Rc::new(RefCell::new(EventRecorder(log.clone())));
    let mut tb = text_box();
    tb.add_listener(listener, &[ControlEvent::TextChanged])?;

    type_str(&mut tb, "ab");
    tb.key_event(KeyEvent::char('\u{8}'));
    // Nothing to delete.
    tb.key_event(KeyEvent::press(Key::End));
    tb.key_event(KeyEvent::press(Key::Delete));
    tb.set_text("x".repeat(24));
    tb.key_event(KeyEvent::press(Key::End));
    tb.key_event(KeyEvent::char('y'));

    let events = log.borrow();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|(id, e)| id == "field" && *e == ControlEvent::TextChanged));
    Ok(())
}

#[test]
fn value_changed_listener_is_rejected() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let listener: ListenerHandle = Rc::new(RefCell::new(EventRecorder(log.clone())));
    let mut tb = text_box();

    let err = tb
        .add_listener(listener, &[ControlEvent::ValueChanged, ControlEvent::TextChanged])
        .unwrap_err();
    assert!(matches!(
        err,
        ControlError::UnsupportedEvent { control: "textBox", event: ControlEvent::ValueChanged }
    ));
    assert!(tb.base().listeners().is_subscribed(ControlEvent::TextChanged));
    assert!(!tb.base().listeners().is_subscribed(ControlEvent::ValueChanged));
}

#[test]
fn built_from_properties() -> Result<()> {
    let props = Properties::from_toml_str(
        r##"
id = "password"
inputMode = "PASSWORD"
passwordChar = "#"
text = "pw12"
bounds = [10, 10, 200, 40]
consumeInputEvents = false
"##,
    )?;
    let mut tb = TextBox::create_from_properties(Style::new(Arc::new(MonospaceFont::default())), &props);

    assert_eq!(tb.id(), "password");
    assert_eq!(tb.type_name(), "textBox");
    assert_eq!(tb.input_mode(), InputMode::Password);
    assert_eq!(tb.displayed_text(), "####");
    assert_eq!(tb.base().bounds(), Rect::new(10.0, 10.0, 200.0, 40.0));
    assert_eq!(tb.key_event(KeyEvent::press(Key::End)), EventResult::Ignored);
    assert_eq!(tb.key_event(KeyEvent::char('3')), EventResult::Ignored);
    assert_eq!(tb.text(), "pw123");
    Ok(())
}

#[test]
fn unknown_input_mode_falls_back_to_text() -> Result<()> {
    let props = Properties::from_toml_str("inputMode = \"password\"\ntext = \"pw\"")?;
    let tb = TextBox::create_from_properties(Style::new(Arc::new(MonospaceFont::default())), &props);
    assert_eq!(tb.input_mode(), InputMode::Text);
    assert_eq!(tb.displayed_text(), "pw");
    assert_eq!(tb.password_char(), '*');
    Ok(())
}
