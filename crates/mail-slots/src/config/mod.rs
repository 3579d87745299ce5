//! # Configuration Namespace
//!
//! A flat, dotted key-value namespace assembled from layered property
//! sources. Sources are consulted in insertion order; the first hit wins.
//!
//! ```toml
//! [multiple-mail]
//! enabled = true
//!
//! [multiple-mail.primary]
//! host = "smtp.example.com"
//! port = 587
//! test-connection = true
//!
//! [multiple-mail.primary.properties]
//! "mail.smtp.starttls.required" = "true"
//!
//! [multiple-mail.secondary]
//! jndi-name = "mail/Session"
//! ```

mod binder;
mod sources;

use std::collections::BTreeSet;

use thiserror::Error;

pub use binder::{bind_slot_settings, feature_enabled};
pub use sources::{EnvSource, MapSource, TomlSource};

/// Errors that can occur while loading a property source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// One layer of configuration.
pub trait PropertySource: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Value for a canonical dotted key.
    fn get(&self, key: &str) -> Option<String>;

    /// Full keys that start with `<prefix>.`.
    fn keys_under(&self, prefix: &str) -> Vec<String>;
}

/// Layered configuration namespace.
#[derive(Default)]
pub struct ConfigNamespace {
    sources: Vec<Box<dyn PropertySource>>,
}

impl ConfigNamespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source with lower precedence than all sources added so far.
    #[must_use]
    pub fn with_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Names of the sources in precedence order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Value for `key` from the first source that has it.
    pub fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|s| s.get(key))
    }

    /// Whether any source has `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Union of keys under `prefix` across all sources.
    pub fn keys_under(&self, prefix: &str) -> BTreeSet<String> {
        self.sources
            .iter()
            .flat_map(|s| s.keys_under(prefix))
            .collect()
    }

    /// Whether any source has at least one key under `prefix`.
    pub fn has_any_under(&self, prefix: &str) -> bool {
        self.sources.iter().any(|s| !s.keys_under(prefix).is_empty())
    }
}

impl std::fmt::Debug for ConfigNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigNamespace")
            .field("sources", &self.source_names())
            .finish()
    }
}
