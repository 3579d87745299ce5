//! # Slot Settings
//!
//! Values bound from one slot's configuration namespace. Unset transport
//! parameters stay `None` so the transport library applies its own defaults.

use std::collections::BTreeMap;

/// Default protocol when `protocol` is not configured.
pub const DEFAULT_PROTOCOL: &str = "smtp";

/// Default encoding when `default-encoding` is not configured.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// SSL options for a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslSettings {
    /// Enable implicit SSL for the configured protocol.
    pub enabled: bool,
    /// Name of an SSL bundle resolved by the transport factory.
    pub bundle: Option<String>,
}

/// Settings bound for one slot.
///
/// `host` and `jndi_name` may both be present; the strategy selector decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSettings {
    /// SMTP server host.
    pub host: Option<String>,
    /// SMTP server port.
    pub port: Option<u16>,
    /// Login user.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Protocol used by the transport.
    pub protocol: String,
    /// Default encoding for messages sent through this slot.
    pub default_encoding: String,
    /// Additional JavaMail-style session properties.
    pub properties: BTreeMap<String, String>,
    /// Name of a session registered in the session directory.
    pub jndi_name: Option<String>,
    /// SSL options.
    pub ssl: SslSettings,
    /// Probe the server once after the sender is built.
    pub test_connection: bool,
    /// Explicit primary-designation override.
    pub default_sender: Option<bool>,
}

impl Default for SlotSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            username: None,
            password: None,
            protocol: DEFAULT_PROTOCOL.to_string(),
            default_encoding: DEFAULT_ENCODING.to_string(),
            properties: BTreeMap::new(),
            jndi_name: None,
            ssl: SslSettings::default(),
            test_connection: false,
            default_sender: None,
        }
    }
}

impl SlotSettings {
    /// Settings with only a host.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }

    /// Settings with only a directory name.
    pub fn with_jndi_name(name: impl Into<String>) -> Self {
        Self {
            jndi_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Whether this slot should be primary when no slot has claimed it yet.
    pub fn primary_eligible(&self, definition_default: bool) -> bool {
        self.default_sender.unwrap_or(definition_default)
    }
}
