//! # Runtime Configuration
//!
//! Where the runtime finds its configuration and what it does after the
//! resolution pass.

use std::path::PathBuf;

use mail_slots::DEFAULT_ROOT_PREFIX;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "multiple-mail.toml";

/// Runtime parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// TOML file with the mail namespace, directory sessions and SSL bundles.
    pub config_path: PathBuf,
    /// Fail when `config_path` does not exist. Off for the default path so
    /// the runtime can be configured from the environment alone.
    pub config_required: bool,
    /// Configuration root of the slot keys.
    pub root_prefix: String,
    /// Provision, report and exit instead of waiting for shutdown.
    pub check_only: bool,
    /// Print the registry summary as JSON.
    pub json_summary: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            config_required: false,
            root_prefix: DEFAULT_ROOT_PREFIX.to_string(),
            check_only: false,
            json_summary: false,
        }
    }
}

impl RuntimeConfig {
    /// Use an explicitly given configuration file, which must exist.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self.config_required = true;
        self
    }

    #[must_use]
    pub fn with_root_prefix(mut self, root: impl Into<String>) -> Self {
        self.root_prefix = root.into();
        self
    }
}
