//! State shared by every control and the trait the dispatcher drives.
//!
//! Controls embed a [`ControlBase`] rather than inheriting from one. The base
//! keeps the control's rectangles in three spaces:
//! - `bounds`: relative to the parent container,
//! - `absolute_bounds` / `viewport_clip_bounds` / `text_bounds`: window pixels,
//! - `clip_bounds`: the visible part of the control in control-local pixels,
//!   which is what touch coordinates are tested against.

use engine_core::{Rect, SpriteBatch, TextFrame};
use rune_config::Properties;

use crate::error::Result;
use crate::event_handler::{EventResult, InputEvent, KeyEvent, TouchEvent, TouchKind};
use crate::listener::{ControlEvent, ListenerHandle, ListenerSet};
use crate::theme::{ControlState, Style};

pub struct ControlBase {
    id: String,
    style: Style,
    state: ControlState,
    bounds: Rect,
    absolute_bounds: Rect,
    clip_bounds: Rect,
    viewport_clip_bounds: Rect,
    text_bounds: Rect,
    /// Last layout inputs, so bounds changes can be re-derived immediately.
    container_clip: Option<Rect>,
    offset: [f32; 2],
    opacity: f32,
    dirty: bool,
    consume_input_events: bool,
    contact: Option<u32>,
    listeners: ListenerSet,
}

impl ControlBase {
    pub fn new(id: impl Into<String>, style: Style) -> Self {
        let mut base = Self {
            id: id.into(),
            style,
            state: ControlState::Normal,
            bounds: Rect::default(),
            absolute_bounds: Rect::default(),
            clip_bounds: Rect::default(),
            viewport_clip_bounds: Rect::default(),
            text_bounds: Rect::default(),
            container_clip: None,
            offset: [0.0, 0.0],
            opacity: 1.0,
            dirty: true,
            consume_input_events: true,
            contact: None,
            listeners: ListenerSet::default(),
        };
        base.opacity = base.style.opacity(base.state);
        base
    }

    /// Apply `id`, `bounds` and `consumeInputEvents` from a property set.
    /// Malformed values are logged and left at their defaults.
    pub fn initialize(&mut self, properties: &Properties) {
        if let Some(id) = properties.id() {
            self.id = id.to_string();
        }
        match properties.get_rect("bounds") {
            Ok(Some([x, y, w, h])) => self.set_bounds(Rect::new(x, y, w, h)),
            Ok(None) => {}
            Err(e) => tracing::error!(control = %self.id, "{e}"),
        }
        match properties.get_bool("consumeInputEvents") {
            Ok(Some(consume)) => self.consume_input_events = consume,
            Ok(None) => {}
            Err(e) => tracing::error!(control = %self.id, "{e}"),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        self.recompute();
        self.dirty = true;
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn set_state(&mut self, state: ControlState) {
        if self.state != state {
            self.state = state;
            self.dirty = true;
        }
    }

    pub fn has_focus(&self) -> bool {
        self.state == ControlState::Focus
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.recompute();
        self.dirty = true;
    }

    pub fn absolute_bounds(&self) -> Rect {
        self.absolute_bounds
    }

    pub fn clip_bounds(&self) -> Rect {
        self.clip_bounds
    }

    pub fn viewport_clip_bounds(&self) -> Rect {
        self.viewport_clip_bounds
    }

    /// Area text is laid out in: absolute bounds minus the style's padding.
    pub fn text_bounds(&self) -> Rect {
        self.text_bounds
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn consume_input_events(&self) -> bool {
        self.consume_input_events
    }

    pub fn set_consume_input_events(&mut self, consume: bool) {
        self.consume_input_events = consume;
    }

    /// Result reported for an event this control acted on.
    pub fn consumed(&self) -> EventResult {
        EventResult::from(self.consume_input_events)
    }

    pub fn contact(&self) -> Option<u32> {
        self.contact
    }

    pub fn set_contact(&mut self, contact: Option<u32>) {
        self.contact = contact;
    }

    /// Whether a control-local point hits the visible part of the control.
    /// The lower edges are exclusive and the upper edges inclusive, so two
    /// abutting controls never both claim their shared edge.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let r = &self.clip_bounds;
        x > r.x && x <= r.right() && y > r.y && y <= r.bottom()
    }

    /// Lay the control out inside a container whose visible area is
    /// `container_clip`, with the container's content origin at `offset`.
    pub fn update(&mut self, container_clip: Rect, offset: [f32; 2]) {
        self.container_clip = Some(container_clip);
        self.offset = offset;
        self.recompute();
        self.opacity = self.style.opacity(self.state);
    }

    fn recompute(&mut self) {
        let [dx, dy] = self.offset;
        self.absolute_bounds = self.bounds.translate(dx, dy);
        self.viewport_clip_bounds = match self.container_clip {
            Some(clip) => self.absolute_bounds.intersect(&clip),
            None => self.absolute_bounds,
        };
        self.clip_bounds = self
            .viewport_clip_bounds
            .translate(-self.absolute_bounds.x, -self.absolute_bounds.y);
        self.text_bounds = self.absolute_bounds.inset(self.style.padding());
    }

    /// Layout parameters for this control's text in its current state.
    pub fn text_frame(&self) -> TextFrame {
        TextFrame {
            area: self.text_bounds,
            size: self.style.font_size(self.state),
            justify: self.style.justify(self.state),
            wrap: true,
            rtl: self.style.rtl(self.state),
        }
    }

    pub fn add_listener(&mut self, listener: ListenerHandle, events: &[ControlEvent]) {
        self.listeners.add(listener, events);
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    pub fn notify_listeners(&self, event: ControlEvent) {
        self.listeners.notify(&self.id, event);
    }

    /// Press/release handling for controls without their own touch behaviour:
    /// press inside activates, release ends the contact and clicks if still inside.
    pub fn default_touch_event(&mut self, event: TouchEvent) -> EventResult {
        let inside = self.contains(event.x, event.y);
        match event.kind {
            TouchKind::Press => {
                if !inside {
                    self.set_state(ControlState::Normal);
                    return EventResult::Ignored;
                }
                self.contact = Some(event.contact);
                self.set_state(ControlState::Active);
                self.notify_listeners(ControlEvent::Press);
            }
            TouchKind::Move => return EventResult::Ignored,
            TouchKind::Release => {
                if self.contact != Some(event.contact) {
                    return EventResult::Ignored;
                }
                self.contact = None;
                self.notify_listeners(ControlEvent::Release);
                if inside {
                    self.set_state(ControlState::Focus);
                    self.notify_listeners(ControlEvent::Click);
                } else {
                    self.set_state(ControlState::Normal);
                }
            }
        }
        self.consumed()
    }
}

/// A control the dispatcher can route input to and draw.
pub trait Control {
    fn base(&self) -> &ControlBase;

    fn base_mut(&mut self) -> &mut ControlBase;

    /// Constant identifier for the control type, e.g. `"textBox"`.
    fn type_name(&self) -> &'static str;

    fn id(&self) -> &str {
        self.base().id()
    }

    fn state(&self) -> ControlState {
        self.base().state()
    }

    fn is_dirty(&self) -> bool {
        self.base().is_dirty()
    }

    /// Touch in control-local coordinates.
    fn touch_event(&mut self, event: TouchEvent) -> EventResult {
        self.base_mut().default_touch_event(event)
    }

    fn key_event(&mut self, event: KeyEvent) -> EventResult {
        let _ = event;
        EventResult::Ignored
    }

    fn handle_event(&mut self, event: InputEvent) -> EventResult {
        match event {
            InputEvent::Touch(e) => self.touch_event(e),
            InputEvent::Key(e) => self.key_event(e),
        }
    }

    fn add_listener(&mut self, listener: ListenerHandle, events: &[ControlEvent]) -> Result<()> {
        self.base_mut().add_listener(listener, events);
        Ok(())
    }

    fn update(&mut self, container_clip: Rect, offset: [f32; 2]) {
        self.base_mut().update(container_clip, offset);
    }

    /// Draw theme images (backgrounds, carets). Clears the dirty flag.
    fn draw_images(&mut self, batch: &mut dyn SpriteBatch, clip: Rect) {
        let _ = (batch, clip);
        self.base_mut().clear_dirty();
    }

    fn draw_text(&self, batch: &mut dyn SpriteBatch, clip: Rect) {
        let _ = (batch, clip);
    }

    fn draw(&mut self, batch: &mut dyn SpriteBatch, clip: Rect) {
        self.draw_images(batch, clip);
        self.draw_text(batch, clip);
    }
}
