//! Rune configuration system
//!
//! This crate provides centralized configuration management for Rune controls:
//! application settings loaded from `rune.toml` (with environment overrides),
//! and the serialized [`Properties`] sets that control factories consume.

mod error;
mod properties;

pub use error::{ConfigError, Result};
pub use properties::Properties;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Text rendering settings
    pub text: TextConfig,
    /// Defaults applied to every control
    pub controls: ControlsConfig,
}

/// Text rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Path to custom font file (.ttf); the built-in monospace font is used when unset
    pub font: Option<PathBuf>,
    /// Default text size in pixels
    pub text_size: f32,
}

/// Control behaviour defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Mask character shown by password text boxes
    pub password_char: char,
    /// Whether controls report the input events they handle as consumed
    pub consume_input_events: bool,
    /// Width of the text caret image in pixels
    pub caret_width: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: None,
            text_size: 18.0,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            password_char: '*',
            consume_input_events: true,
            caret_width: 2.0,
        }
    }
}

impl RuneConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        match Self::load_from_file("rune.toml") {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring rune.toml: {e}");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// This allows for temporary overrides without modifying the config file.
    pub fn merge_with_env(&mut self) {
        // Text settings
        if let Ok(font) = std::env::var("RUNE_TEXT_FONT") {
            self.text.font = Some(PathBuf::from(font));
        }
        if let Ok(val) = std::env::var("RUNE_TEXT_SIZE") {
            if let Ok(size) = val.parse::<f32>() {
                self.text.text_size = size;
            }
        }

        // Control settings
        if let Ok(val) = std::env::var("RUNE_PASSWORD_CHAR") {
            let mut chars = val.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                self.controls.password_char = c;
            }
        }
        if let Ok(val) = std::env::var("RUNE_CONSUME_INPUT") {
            self.controls.consume_input_events = val == "1" || val.eq_ignore_ascii_case("true");
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
