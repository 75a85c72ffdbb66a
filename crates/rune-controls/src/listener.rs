//! Control event listeners.

use std::cell::RefCell;
use std::rc::Rc;

/// Events a control can report to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    Press,
    Release,
    Click,
    ValueChanged,
    TextChanged,
}

/// Receives events from the controls it is registered with.
pub trait ControlListener {
    fn control_event(&mut self, control_id: &str, event: ControlEvent);
}

pub type ListenerHandle = Rc<RefCell<dyn ControlListener>>;

/// Registered listeners, each with the events it subscribed to.
#[derive(Default)]
pub struct ListenerSet {
    entries: Vec<(ControlEvent, ListenerHandle)>,
}

impl ListenerSet {
    pub fn add(&mut self, listener: ListenerHandle, events: &[ControlEvent]) {
        for &event in events {
            let already = self
                .entries
                .iter()
                .any(|(e, l)| *e == event && Rc::ptr_eq(l, &listener));
            if !already {
                self.entries.push((event, listener.clone()));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_subscribed(&self, event: ControlEvent) -> bool {
        self.entries.iter().any(|(e, _)| *e == event)
    }

    pub fn notify(&self, control_id: &str, event: ControlEvent) {
        for (_, listener) in self.entries.iter().filter(|(e, _)| *e == event) {
            // A listener reacting to its own notification would re-enter here.
            match listener.try_borrow_mut() {
                Ok(mut l) => l.control_event(control_id, event),
                Err(_) => tracing::debug!(
                    control = control_id,
                    ?event,
                    "skipping listener already handling an event"
                ),
            }
        }
    }
}
