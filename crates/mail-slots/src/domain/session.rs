//! # Mail Session
//!
//! Opaque-to-the-engine connection description produced by either strategy.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::settings::{SlotSettings, DEFAULT_PROTOCOL};

/// Where a session came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Resolved by name from the session directory.
    Directory {
        /// The registered name that was looked up.
        name: String,
    },
    /// Built directly from slot settings.
    Explicit,
}

/// Connection parameters of one mail session.
#[derive(Clone, PartialEq, Eq)]
pub struct MailSession {
    /// Strategy that produced this session.
    pub origin: SessionOrigin,
    /// Server host.
    pub host: Option<String>,
    /// Server port.
    pub port: Option<u16>,
    /// Transport protocol.
    pub protocol: String,
    /// Login user.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// JavaMail-style session properties.
    pub properties: BTreeMap<String, String>,
}

impl MailSession {
    /// A directory session with only a host set.
    pub fn registered(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            origin: SessionOrigin::Directory { name: name.into() },
            host: Some(host.into()),
            port: None,
            protocol: DEFAULT_PROTOCOL.to_string(),
            username: None,
            password: None,
            properties: BTreeMap::new(),
        }
    }

    /// Map explicit slot settings onto a session.
    ///
    /// Host, port, credentials, protocol and the properties map are copied;
    /// `ssl.enabled` becomes `mail.<protocol>.ssl.enable=true`.
    pub fn from_settings(settings: &SlotSettings) -> Self {
        let mut properties = settings.properties.clone();
        if settings.ssl.enabled {
            properties.insert(
                format!("mail.{}.ssl.enable", settings.protocol),
                "true".to_string(),
            );
        }
        Self {
            origin: SessionOrigin::Explicit,
            host: settings.host.clone(),
            port: settings.port,
            protocol: settings.protocol.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            properties,
        }
    }

    /// Look up a protocol-scoped property, e.g. `property("ssl.enable")`
    /// reads `mail.<protocol>.ssl.enable`.
    pub fn property(&self, suffix: &str) -> Option<&str> {
        self.properties
            .get(&format!("mail.{}.{}", self.protocol, suffix))
            .map(String::as_str)
    }

    /// Whether a protocol-scoped property is set to `true`.
    pub fn flag(&self, suffix: &str) -> bool {
        self.property(suffix)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Whether this session came from the directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.origin, SessionOrigin::Directory { .. })
    }
}

// Keeps the password out of logs.
impl fmt::Debug for MailSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSession")
            .field("origin", &self.origin)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "******"))
            .field("properties", &self.properties)
            .finish()
    }
}
