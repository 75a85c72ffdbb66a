//! Headless text box demo.
//!
//! Builds a login form from an inline property set, replays a scripted
//! mouse/keyboard session through the winit input translator, then records
//! one frame and prints its display list.
//!
//! `rune.toml` (or `RUNE_*` variables) picks the font, text size and control
//! defaults; `RUST_LOG=debug` shows rolled-back edits and caret snapping.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use engine_core::{
    ColorLinPremul, Font, FontdueFont, Insets, MonospaceFont, Painter, Rect, TextureId, Uvs,
    Viewport,
};
use rune_config::{Properties, RuneConfig};
use rune_controls::{
    CARET_IMAGE, Control, ControlEvent, ControlListener, ControlState, InputEvent, InputTranslator,
    Key, KeyKind, ListenerHandle, StateStyle, Style, TextBox, ThemeImage, VirtualKeyboard,
};
use winit::event::{ElementState, MouseButton};

const GLYPH_ATLAS: TextureId = TextureId(1);
const THEME_ATLAS: TextureId = TextureId(2);
const VIEWPORT: Viewport = Viewport {
    width: 320,
    height: 120,
};

const FORM: &str = r#"
[username]
id = "username"
text = "guest"
bounds = [20, 20, 240, 32]

[password]
id = "password"
inputMode = "PASSWORD"
bounds = [20, 64, 240, 32]
"#;

/// Logs show/hide requests in place of a platform keyboard.
struct LoggingKeyboard(String);

impl VirtualKeyboard for LoggingKeyboard {
    fn set_visible(&mut self, visible: bool) {
        log::info!("{}: on-screen keyboard {}", self.0, if visible { "shown" } else { "hidden" });
    }
}

struct ChangeLog;

impl ControlListener for ChangeLog {
    fn control_event(&mut self, control_id: &str, event: ControlEvent) {
        log::info!("{control_id}: {event:?}");
    }
}

enum Step {
    Click([f32; 2]),
    Type(&'static str),
    Key(Key),
    Ctrl(Key),
}

const SCRIPT: &[Step] = &[
    Step::Click([200.0, 36.0]),
    Step::Type(" user"),
    Step::Ctrl(Key::LeftArrow),
    Step::Key(Key::Backspace),
    Step::Key(Key::Tab),
    Step::Type("hunter2"),
    Step::Key(Key::Home),
    Step::Key(Key::Delete),
    Step::Click([300.0, 110.0]),
];

fn load_font(config: &RuneConfig) -> Result<Arc<dyn Font>> {
    let Some(path) = &config.text.font else {
        return Ok(Arc::new(MonospaceFont::new(GLYPH_ATLAS, 0.55)));
    };
    let mut font = FontdueFont::load(path, GLYPH_ATLAS)?;
    // Printable ASCII in a 16x16 grid, one cell per code point.
    let cell = 1.0 / 16.0;
    for code in 0x20u32..0x7f {
        let Some(ch) = char::from_u32(code) else {
            continue;
        };
        let (u1, v1) = ((code % 16) as f32 * cell, (code / 16) as f32 * cell);
        font.set_glyph_uvs(
            ch,
            Uvs {
                u1,
                v1,
                u2: u1 + cell,
                v2: v1 + cell,
            },
        );
    }
    log::debug!("mapped glyph atlas cells for {}", path.display());
    Ok(Arc::new(font))
}

fn build_style(config: &RuneConfig, font: Arc<dyn Font>) -> Style {
    let caret = ThemeImage {
        texture: THEME_ATLAS,
        region: Rect::new(0.0, 0.0, config.controls.caret_width, config.text.text_size),
        uvs: Uvs::FULL,
        color: ColorLinPremul::from_hex("#1e90ff").unwrap_or(ColorLinPremul::WHITE),
    };
    Style::new(font)
        .with_padding(Insets::uniform(6.0))
        .with_state(
            ControlState::Normal,
            StateStyle::default()
                .with_font_size(config.text.text_size)
                .with_text_color(ColorLinPremul::rgba(200, 200, 200, 255))
                .with_image(CARET_IMAGE, caret),
        )
        .with_state(
            ControlState::Active,
            StateStyle::default().with_text_color(ColorLinPremul::WHITE),
        )
}

fn build_form(config: &RuneConfig, style: &Style) -> Result<Vec<TextBox>> {
    let form = Properties::from_toml_str(FORM)?;
    let listener: ListenerHandle = Rc::new(RefCell::new(ChangeLog));
    let mut boxes = Vec::new();
    for name in form.namespaces() {
        let Some(props) = form.namespace(name) else {
            continue;
        };
        let mut text_box = TextBox::create(name, style.clone())
            .with_keyboard(Box::new(LoggingKeyboard(name.to_string())));
        text_box.apply_config(&config.controls);
        text_box.initialize(&props);
        text_box.add_listener(listener.clone(), &[ControlEvent::TextChanged])?;
        boxes.push(text_box);
    }
    Ok(boxes)
}

fn expand(step: &Step, input: &mut InputTranslator) -> Vec<InputEvent> {
    let mut events = Vec::new();
    match step {
        Step::Click(at) => {
            events.extend(input.on_cursor_moved(*at));
            events.extend(input.on_mouse_button(ElementState::Pressed, MouseButton::Left));
            events.extend(input.on_mouse_button(ElementState::Released, MouseButton::Left));
        }
        Step::Type(text) => {
            for ch in text.chars() {
                let typed = ch.to_string();
                events.extend(input.on_key(ElementState::Pressed, None, Some(typed.as_str())));
            }
        }
        Step::Key(key) => {
            events.extend(input.on_key(ElementState::Pressed, Some(*key), None));
            events.extend(input.on_key(ElementState::Released, Some(*key), None));
        }
        Step::Ctrl(key) => {
            events.extend(input.on_key(ElementState::Pressed, Some(Key::Ctrl), None));
            events.extend(input.on_key(ElementState::Pressed, Some(*key), None));
            events.extend(input.on_key(ElementState::Released, Some(*key), None));
            events.extend(input.on_key(ElementState::Released, Some(Key::Ctrl), None));
        }
    }
    events
}

/// Touches go to every box in its own coordinates; keys go to the focused box.
/// An unconsumed tab press moves focus to the next box.
fn dispatch(form: &mut [TextBox], focused: &mut Option<usize>, event: InputEvent) {
    match event {
        InputEvent::Touch(touch) => {
            *focused = None;
            for (i, text_box) in form.iter_mut().enumerate() {
                let origin = text_box.base().absolute_bounds();
                text_box.touch_event(touch.relative_to([origin.x, origin.y]));
                if text_box.state() != ControlState::Normal {
                    *focused = Some(i);
                }
            }
        }
        InputEvent::Key(key) => {
            let Some(i) = *focused else {
                return;
            };
            let result = form[i].key_event(key);
            if !result.is_handled() && key.key == Key::Tab && key.kind == KeyKind::Press {
                form[i].base_mut().set_state(ControlState::Normal);
                let next = (i + 1) % form.len();
                form[next].base_mut().set_state(ControlState::Focus);
                *focused = Some(next);
                log::info!("focus moved to {}", form[next].id());
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RuneConfig::load();
    let font = load_font(&config)?;
    let style = build_style(&config, font);
    let mut form = build_form(&config, &style)?;

    let window = Rect::new(0.0, 0.0, VIEWPORT.width as f32, VIEWPORT.height as f32);
    for text_box in &mut form {
        text_box.update(window, [0.0, 0.0]);
    }

    let mut input = InputTranslator::new();
    let mut focused = None;
    for step in SCRIPT {
        for event in expand(step, &mut input) {
            dispatch(&mut form, &mut focused, event);
        }
        for text_box in &mut form {
            text_box.update(window, [0.0, 0.0]);
        }
    }

    let mut painter = Painter::begin_frame(VIEWPORT);
    for text_box in &mut form {
        log::info!(
            "{} [{}] = {:?} shown as {:?}",
            text_box.id(),
            text_box.input_mode(),
            text_box.text(),
            text_box.displayed_text()
        );
        painter.push_clip_rect(text_box.base().viewport_clip_bounds());
        text_box.draw(&mut painter, window);
        painter.pop_clip();
    }

    let list = painter.finish();
    println!("viewport {}x{}", list.viewport.width, list.viewport.height);
    for command in &list.commands {
        println!("{command:?}");
    }
    Ok(())
}
