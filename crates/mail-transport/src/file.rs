//! Loads the collaborator tables from the runtime configuration file.
//!
//! The same TOML file holds the `multiple-mail` namespace; only the
//! `directory` and `ssl-bundles` tables are read here.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use mail_slots::ConfigError;
use serde::Deserialize;
use tracing::info;

use crate::bundles::{SslBundle, SslBundleRegistry};
use crate::directory::{DirectoryEntry, StaticSessionDirectory};

/// Directory entries and SSL bundles declared in a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransportFile {
    #[serde(default)]
    pub directory: BTreeMap<String, DirectoryEntry>,
    #[serde(default)]
    pub ssl_bundles: BTreeMap<String, SslBundle>,
}

impl TransportFile {
    /// Read and parse `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let file = Self::parse(&content)?;
        info!(
            path = %path.display(),
            sessions = file.directory.len(),
            bundles = file.ssl_bundles.len(),
            "Loaded transport configuration"
        );
        Ok(file)
    }

    /// Parse a TOML document.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Split into the session directory and the bundle registry.
    pub fn into_parts(self) -> (StaticSessionDirectory, SslBundleRegistry) {
        (self.directory.into(), self.ssl_bundles.into())
    }
}
