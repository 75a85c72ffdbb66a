//! Error types for controls.

use thiserror::Error;

use crate::listener::ControlEvent;

/// Result type for control operations.
pub type Result<T> = std::result::Result<T, ControlError>;

/// Configuration errors reported by controls. The control falls back to a
/// default and keeps working; the error tells the caller what was ignored.
#[derive(Error, Debug)]
pub enum ControlError {
    /// Input mode token was not `TEXT` or `PASSWORD`.
    #[error("unsupported text box input mode '{0}'")]
    UnsupportedInputMode(String),

    /// The control never emits this event, so a listener can't subscribe to it.
    #[error("{event:?} event is not applicable to {control}")]
    UnsupportedEvent {
        control: &'static str,
        event: ControlEvent,
    },

    /// A property in the control's property set was malformed.
    #[error(transparent)]
    Config(#[from] rune_config::ConfigError),
}
