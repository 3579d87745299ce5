//! # Mail Runtime
//!
//! Startup sequence:
//!
//! 1. Load the configuration file (if present) and layer the environment over it
//! 2. Build the session directory and the SMTP transport factory
//! 3. Resolve the standard slots in priority order
//! 4. Hand out the registry

use std::sync::Arc;

use anyhow::{Context, Result};
use mail_slots::{
    ConfigError, ConfigNamespace, EnvSource, ProvisioningService, SlotRegistry, TomlSource,
};
use mail_telemetry::log_slot_event;
use mail_transport::{SmtpMailSender, SmtpTransportFactory, StaticSessionDirectory, TransportFile};
use tracing::{info, warn};

use crate::config::RuntimeConfig;

/// Provisioned senders, shared read-only after startup.
pub type MailRegistry = Arc<SlotRegistry<SmtpMailSender>>;

/// Drives provisioning from a [`RuntimeConfig`].
pub struct MailRuntime {
    config: RuntimeConfig,
}

impl MailRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    fn config_file_present(&self) -> Result<bool, ConfigError> {
        if self.config.config_path.exists() {
            return Ok(true);
        }
        if self.config.config_required {
            return Err(ConfigError::Io {
                path: self.config.config_path.display().to_string(),
                error: "file not found".to_string(),
            });
        }
        warn!(
            path = %self.config.config_path.display(),
            "Configuration file not found, using environment only"
        );
        Ok(false)
    }

    /// Build the namespace: `env` first, then the configuration file.
    pub fn load_namespace(&self, env: EnvSource) -> Result<ConfigNamespace, ConfigError> {
        let mut namespace = ConfigNamespace::new().with_source(env);
        if self.config_file_present()? {
            namespace = namespace.with_source(TomlSource::load(&self.config.config_path)?);
        }
        info!(sources = ?namespace.source_names(), "Configuration namespace assembled");
        Ok(namespace)
    }

    /// Build the session directory and the transport factory.
    pub fn load_collaborators(
        &self,
    ) -> Result<(StaticSessionDirectory, SmtpTransportFactory), ConfigError> {
        let file = if self.config_file_present()? {
            TransportFile::load(&self.config.config_path)?
        } else {
            TransportFile::default()
        };
        let (directory, bundles) = file.into_parts();
        Ok((directory, SmtpTransportFactory::new(bundles)))
    }

    /// Provision from the process environment and the configuration file.
    pub fn provision(&self) -> Result<MailRegistry> {
        self.provision_with(EnvSource::from_env())
    }

    /// Provision with an explicit environment snapshot.
    pub fn provision_with(&self, env: EnvSource) -> Result<MailRegistry> {
        info!("===========================================");
        info!("  MULTIPLE MAIL - PROVISIONING");
        info!("===========================================");

        let namespace = self
            .load_namespace(env)
            .context("Failed to load mail configuration")?;
        let (directory, factory) = self
            .load_collaborators()
            .context("Failed to load session directory or SSL bundles")?;

        let service = ProvisioningService::new(directory, factory)
            .with_root_prefix(self.config.root_prefix.clone());
        let registry = service
            .resolve_all(&service.standard_definitions(), &namespace)
            .context("Mail sender provisioning aborted")?;

        for resource in registry.iter() {
            log_slot_event!(
                info,
                resource.slot_name,
                "Sender ready",
                qualifier = %resource.sender_name,
                host = %resource.client.host(),
                port = resource.client.port(),
                default = resource.is_primary
            );
        }

        Ok(Arc::new(registry))
    }
}
