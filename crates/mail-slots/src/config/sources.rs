//! # Property Sources
//!
//! Concrete [`PropertySource`]s: an in-memory map, a flattened TOML
//! document, and the process environment with relaxed variable names.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::{ConfigError, PropertySource};

fn under<'a>(
    entries: &'a BTreeMap<String, String>,
    prefix: &'a str,
) -> impl Iterator<Item = &'a String> + 'a {
    let lead = format!("{}.", prefix);
    entries.keys().filter(move |k| k.starts_with(&lead))
}

// ============================================================================
// MapSource - In-memory key/value pairs
// ============================================================================

/// In-memory source with canonical keys.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    name: String,
    entries: BTreeMap<String, String>,
}

impl MapSource {
    /// Create an empty source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Create from `(key, value)` pairs.
    pub fn from_pairs<K, V>(name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut source = Self::new(name);
        for (k, v) in pairs {
            source.entries.insert(k.into(), v.into());
        }
        source
    }

    /// Set a key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl PropertySource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn keys_under(&self, prefix: &str) -> Vec<String> {
        under(&self.entries, prefix).cloned().collect()
    }
}

// ============================================================================
// TomlSource - Configuration file
// ============================================================================

/// A TOML document flattened to dotted keys.
///
/// Nested tables become dotted segments; quoted keys keep their dots, so
/// `[a.properties] "mail.smtp.auth" = "true"` is `a.properties.mail.smtp.auth`.
#[derive(Debug, Clone)]
pub struct TomlSource {
    name: String,
    entries: BTreeMap<String, String>,
}

impl TomlSource {
    /// Load a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let mut source = Self::parse(&content)?;
        source.name = path.display().to_string();
        Ok(source)
    }

    /// Parse a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut entries = BTreeMap::new();
        flatten("", &table, &mut entries);

        Ok(Self {
            name: "toml".to_string(),
            entries,
        })
    }

    /// Number of flattened keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document had no scalar values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten(&full, nested, out),
            other => {
                out.insert(full, render(other));
            }
        }
    }
}

fn render(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        toml::Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(","),
        toml::Value::Table(t) => t.to_string(),
    }
}

impl PropertySource for TomlSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn keys_under(&self, prefix: &str) -> Vec<String> {
        under(&self.entries, prefix).cloned().collect()
    }
}

// ============================================================================
// EnvSource - Process environment with relaxed binding
// ============================================================================

/// Environment variables addressed by canonical keys.
///
/// `multiple-mail.primary.jndi-name` is read from `MULTIPLEMAIL_PRIMARY_JNDINAME`:
/// upper case, `.` becomes `_`, `-` is dropped.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: BTreeMap<String, String>,
}

impl EnvSource {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build from explicit `(NAME, value)` pairs.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Environment variable name for a canonical key.
    pub fn variable_name(key: &str) -> String {
        key.chars()
            .filter(|c| *c != '-')
            .map(|c| if c == '.' { '_' } else { c.to_ascii_uppercase() })
            .collect()
    }
}

impl PropertySource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(&Self::variable_name(key)).cloned()
    }

    fn keys_under(&self, prefix: &str) -> Vec<String> {
        let lead = format!("{}_", Self::variable_name(prefix));
        self.vars
            .keys()
            .filter_map(|var| var.strip_prefix(&lead))
            .filter(|rest| !rest.is_empty())
            .map(|rest| format!("{}.{}", prefix, rest.to_ascii_lowercase().replace('_', ".")))
            .collect()
    }
}
