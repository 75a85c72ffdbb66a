use std::borrow::Cow;
use std::fmt;

use crate::error::{ControlError, Result};

/// How a text box displays its contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Text is displayed as typed.
    #[default]
    Text,
    /// Every character is displayed as the mask character.
    Password,
}

impl InputMode {
    /// Parse a property token. Tokens are case-sensitive.
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            "TEXT" => Ok(InputMode::Text),
            "PASSWORD" => Ok(InputMode::Password),
            other => Err(ControlError::UnsupportedInputMode(other.to_string())),
        }
    }

    /// Mode for an optional property value. A missing value means `Text`; an
    /// unknown one is logged and also falls back to `Text`.
    pub fn parse(token: Option<&str>) -> Self {
        match token.map(Self::from_token) {
            None => InputMode::Text,
            Some(Ok(mode)) => mode,
            Some(Err(e)) => {
                tracing::error!("{e}");
                InputMode::Text
            }
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            InputMode::Text => "TEXT",
            InputMode::Password => "PASSWORD",
        }
    }

    /// The string to measure and draw for `text`.
    pub fn display<'a>(&self, text: &'a str, mask: char) -> Cow<'a, str> {
        match self {
            InputMode::Text => Cow::Borrowed(text),
            InputMode::Password => Cow::Owned(text.chars().map(|_| mask).collect()),
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
