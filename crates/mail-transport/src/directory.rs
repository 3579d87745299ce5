//! # Static Session Directory
//!
//! Sessions registered ahead of time under a name, e.g. by operations in the
//! runtime configuration file:
//!
//! ```toml
//! [directory."mail/Session"]
//! host = "relay.internal"
//! port = 587
//!
//! [directory."mail/Session".properties]
//! "mail.smtp.starttls.required" = "true"
//! ```

use std::collections::BTreeMap;

use mail_slots::{DirectoryError, MailSession, SessionDirectory, SessionOrigin};
use serde::Deserialize;
use tracing::debug;

/// One registered session as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DirectoryEntry {
    /// Server host. A session without a host is accepted here and rejected
    /// when the client is built.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

fn default_protocol() -> String {
    mail_slots::domain::settings::DEFAULT_PROTOCOL.to_string()
}

impl DirectoryEntry {
    fn to_session(&self, name: &str) -> MailSession {
        MailSession {
            origin: SessionOrigin::Directory {
                name: name.to_string(),
            },
            host: self.host.clone(),
            port: self.port,
            protocol: self.protocol.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            properties: self.properties.clone(),
        }
    }
}

/// A directory backed by a fixed table of entries.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionDirectory {
    entries: BTreeMap<String, DirectoryEntry>,
}

impl StaticSessionDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entry` under `name`.
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, entry: DirectoryEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    /// Registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, DirectoryEntry>> for StaticSessionDirectory {
    fn from(entries: BTreeMap<String, DirectoryEntry>) -> Self {
        Self { entries }
    }
}

impl SessionDirectory for StaticSessionDirectory {
    fn lookup(&self, name: &str) -> Result<MailSession, DirectoryError> {
        debug!(jndi_name = %name, "Directory lookup");
        self.entries
            .get(name)
            .map(|entry| entry.to_session(name))
            .ok_or_else(|| DirectoryError::NotFound {
                name: name.to_string(),
            })
    }
}
