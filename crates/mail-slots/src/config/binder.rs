//! # Configuration Binder
//!
//! Binds one slot's namespace into [`SlotSettings`]. A namespace with no keys
//! at all yields `Ok(None)`: the slot is unconfigured, which is not an error.

use tracing::{debug, warn};

use super::ConfigNamespace;
use crate::domain::errors::BindingError;
use crate::domain::settings::SlotSettings;

/// Whether the multi-slot feature is enabled under `root`.
///
/// Enabled when `<root>.enabled` is missing or equals `true` (any case).
pub fn feature_enabled(config: &ConfigNamespace, root: &str) -> bool {
    let key = format!("{}.enabled", root);
    match config.get(&key) {
        None => true,
        Some(value) if value.trim().eq_ignore_ascii_case("true") => true,
        Some(value) => {
            if !value.trim().eq_ignore_ascii_case("false") {
                warn!(key = %key, value = %value, "Unrecognized value, treating feature as disabled");
            }
            false
        }
    }
}

/// Bind the settings of the slot rooted at `prefix`.
///
/// A slot with neither `host` nor `jndi-name` binds to default settings and
/// its typed keys are not checked, so it is skipped rather than failed.
///
/// # Errors
///
/// Returns [`BindingError::TypeMismatch`] when a typed key (port, booleans)
/// holds a value of the wrong type.
pub fn bind_slot_settings(
    config: &ConfigNamespace,
    prefix: &str,
) -> Result<Option<SlotSettings>, BindingError> {
    if !config.has_any_under(prefix) {
        return Ok(None);
    }

    let binder = Binder { config, prefix };
    let host = binder.discriminator("host");
    let jndi_name = binder.discriminator("jndi-name");
    if host.is_none() && jndi_name.is_none() {
        // The slot will be skipped; its typed keys are never parsed.
        debug!(prefix = %prefix, "Neither host nor jndi-name set, leaving slot unbound");
        return Ok(Some(SlotSettings::default()));
    }

    let mut settings = SlotSettings {
        host,
        port: binder.port("port")?,
        username: binder.text("username"),
        password: binder.text("password"),
        jndi_name,
        test_connection: binder.boolean("test-connection")?.unwrap_or(false),
        default_sender: binder.boolean("default")?,
        ..SlotSettings::default()
    };

    if let Some(protocol) = binder.text("protocol") {
        settings.protocol = protocol;
    }
    if let Some(encoding) = binder
        .text("default-encoding")
        .or_else(|| binder.text("encoding"))
    {
        settings.default_encoding = encoding;
    }

    settings.ssl.enabled = binder.boolean("ssl.enabled")?.unwrap_or(false);
    settings.ssl.bundle = binder.text("ssl.bundle");
    settings.properties = binder.map("properties");

    Ok(Some(settings))
}

struct Binder<'a> {
    config: &'a ConfigNamespace,
    prefix: &'a str,
}

impl Binder<'_> {
    fn key(&self, suffix: &str) -> String {
        format!("{}.{}", self.prefix, suffix)
    }

    fn raw(&self, suffix: &str) -> Option<(String, String)> {
        let key = self.key(suffix);
        self.config.get(&key).map(|value| (key, value))
    }

    /// Trimmed, non-blank text.
    fn text(&self, suffix: &str) -> Option<String> {
        self.raw(suffix)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Text for a strategy-discriminating key; the literal `false` is absent.
    fn discriminator(&self, suffix: &str) -> Option<String> {
        self.text(suffix)
            .filter(|v| !v.eq_ignore_ascii_case("false"))
    }

    fn port(&self, suffix: &str) -> Result<Option<u16>, BindingError> {
        let Some((key, value)) = self.raw(suffix) else {
            return Ok(None);
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<u16>()
            .map(Some)
            .map_err(|_| BindingError::TypeMismatch {
                key,
                value,
                expected: "port number (0-65535)",
            })
    }

    fn boolean(&self, suffix: &str) -> Result<Option<bool>, BindingError> {
        let Some((key, value)) = self.raw(suffix) else {
            return Ok(None);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "yes" | "on" | "1" => Ok(Some(true)),
            "false" | "no" | "off" | "0" => Ok(Some(false)),
            _ => Err(BindingError::TypeMismatch {
                key,
                value,
                expected: "boolean",
            }),
        }
    }

    fn map(&self, suffix: &str) -> std::collections::BTreeMap<String, String> {
        let root = self.key(suffix);
        let lead = format!("{}.", root);
        self.config
            .keys_under(&root)
            .into_iter()
            .filter_map(|key| {
                let name = key.strip_prefix(&lead)?.to_string();
                self.config.get(&key).map(|value| (name, value))
            })
            .collect()
    }
}
