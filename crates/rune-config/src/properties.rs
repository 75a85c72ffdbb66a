//! Serialized property sets for controls.
//!
//! A property set is a flat TOML table describing one control instance:
//!
//! ```toml
//! id = "password"
//! inputMode = "PASSWORD"
//! bounds = [20, 40, 240, 32]
//! ```
//!
//! Nested tables are namespaces, so a form can hold several controls:
//! `[username]`, `[password]`, ...

use std::path::Path;

use toml::{Table, Value};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    table: Table,
}

impl Properties {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(Self::new(s.parse::<Table>()?))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The `id` property, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.table.get("id").and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Nested table `name` as its own property set.
    pub fn namespace(&self, name: &str) -> Option<Properties> {
        self.table
            .get(name)
            .and_then(Value::as_table)
            .map(|t| Properties::new(t.clone()))
    }

    /// Names of all nested namespaces, in key order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.table
            .iter()
            .filter(|(_, v)| v.is_table())
            .map(|(k, _)| k.as_str())
    }

    pub fn get_string(&self, key: &str) -> Result<Option<&str>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(invalid(key, "a string")),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(_) => Err(invalid(key, "a boolean")),
        }
    }

    /// Integers are accepted and widened.
    pub fn get_f32(&self, key: &str) -> Result<Option<f32>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(v) => number(v).map(Some).ok_or_else(|| invalid(key, "a number")),
        }
    }

    /// A string holding exactly one character.
    pub fn get_char(&self, key: &str) -> Result<Option<char>> {
        let Some(s) = self.get_string(key)? else {
            return Ok(None);
        };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Some(c)),
            _ => Err(invalid(key, "a single character")),
        }
    }

    /// `[x, y, w, h]` as four numbers.
    pub fn get_rect(&self, key: &str) -> Result<Option<[f32; 4]>> {
        let Some(value) = self.table.get(key) else {
            return Ok(None);
        };
        let parts: Option<Vec<f32>> = value
            .as_array()
            .and_then(|a| a.iter().map(number).collect::<Option<Vec<f32>>>());
        match parts.as_deref() {
            Some(&[x, y, w, h]) => Ok(Some([x, y, w, h])),
            _ => Err(invalid(key, "an array of four numbers")),
        }
    }
}

fn number(v: &Value) -> Option<f32> {
    match v {
        Value::Float(f) => Some(*f as f32),
        Value::Integer(i) => Some(*i as f32),
        _ => None,
    }
}

fn invalid(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidProperty {
        key: key.to_string(),
        expected,
    }
}
