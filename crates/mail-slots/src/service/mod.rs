//! # Provisioning Service
//!
//! The ordering controller: resolves slot definitions strictly in ascending
//! priority, one at a time, and applies the error policy.
//!
//! ## Ordering
//!
//! Slots never resolve in parallel. The only state shared between slots is
//! the owner of the default designation: the first primary-eligible slot in
//! priority order claims it, later eligible slots get a warning.
//!
//! ## Error Policy
//!
//! | Error | Non-primary slot | Primary candidate |
//! |-------|------------------|-------------------|
//! | `Binding` | skip, log | skip, log |
//! | `ResourceResolution` | skip, log | abort |
//! | `Construction` | skip, log | abort |
//! | `Validation` | skip, log | abort |
//! | `DuplicateRegistration` | abort | abort |

mod resolver;
pub mod validator;

use std::collections::BTreeSet;

use tracing::{error, info, warn};

use crate::config::{feature_enabled, ConfigNamespace};
use crate::domain::definition::{standard_slots, SlotDefinition, DEFAULT_ROOT_PREFIX};
use crate::domain::errors::ProvisioningError;
use crate::ports::outbound::{SessionDirectory, TransportFactory};
use crate::registry::{SkipReason, SlotRegistry, SlotStatus};

use resolver::{SlotResolution, SlotResolver};

pub use validator::validate;

/// Resolves slot definitions into a [`SlotRegistry`].
pub struct ProvisioningService<D, F> {
    directory: D,
    factory: F,
    root_prefix: String,
}

impl<D, F> ProvisioningService<D, F>
where
    D: SessionDirectory,
    F: TransportFactory,
{
    /// Create a service rooted at [`DEFAULT_ROOT_PREFIX`].
    pub fn new(directory: D, factory: F) -> Self {
        Self {
            directory,
            factory,
            root_prefix: DEFAULT_ROOT_PREFIX.to_string(),
        }
    }

    /// Use a different configuration root (e.g. `spring.multiple-mail`).
    #[must_use]
    pub fn with_root_prefix(mut self, root: impl Into<String>) -> Self {
        self.root_prefix = root.into();
        self
    }

    /// Configuration root.
    pub fn root_prefix(&self) -> &str {
        &self.root_prefix
    }

    /// The session directory.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// The transport factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// The six standard slots under this service's root.
    pub fn standard_definitions(&self) -> Vec<SlotDefinition> {
        standard_slots(&self.root_prefix)
    }

    /// Resolve `definitions` into a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: a failure of the slot that would
    /// become primary, or a duplicate slot name.
    pub fn resolve_all(
        &self,
        definitions: &[SlotDefinition],
        config: &ConfigNamespace,
    ) -> Result<SlotRegistry<F::Client>, ProvisioningError> {
        self.resolve_into(SlotRegistry::new(), definitions, config)
    }

    /// Resolve `definitions` into `registry`. Slots whose name is already
    /// claimed in `registry` are skipped as a no-op.
    pub fn resolve_into(
        &self,
        mut registry: SlotRegistry<F::Client>,
        definitions: &[SlotDefinition],
        config: &ConfigNamespace,
    ) -> Result<SlotRegistry<F::Client>, ProvisioningError> {
        check_unique_names(definitions)?;

        let mut ordered: Vec<&SlotDefinition> = definitions.iter().collect();
        ordered.sort_by_key(|d| d.priority);

        if !feature_enabled(config, &self.root_prefix) {
            info!(root = %self.root_prefix, "Multiple mail senders disabled by configuration");
            for definition in ordered {
                registry.set_status(&definition.name, SlotStatus::Skipped(SkipReason::FeatureDisabled));
            }
            return Ok(registry);
        }

        info!(slots = ordered.len(), root = %self.root_prefix, "Resolving mail sender slots");

        let resolver = SlotResolver::new(&self.directory, &self.factory);
        let mut primary_owner = registry.primary().map(|r| r.slot_name.clone());

        for definition in ordered {
            let name = definition.name.as_str();

            if registry.is_claimed(name) {
                info!(slot = %name, "Slot already registered, skipping");
                registry.set_status(name, SlotStatus::Skipped(SkipReason::AlreadyRegistered));
                continue;
            }

            match resolver.resolve(definition, config, primary_owner.as_deref()) {
                Ok(SlotResolution::Skipped(reason)) => {
                    registry.set_status(name, SlotStatus::Skipped(reason));
                }
                Ok(SlotResolution::Resolved(resource)) => {
                    if resource.is_primary {
                        primary_owner = Some(resource.slot_name.clone());
                    }
                    registry.register(resource)?;
                }
                Err(failure) if failure.is_fatal() => {
                    error!(slot = %name, error = %failure.error, "Aborting mail sender provisioning");
                    return Err(failure.error);
                }
                Err(failure) => {
                    warn!(slot = %name, error = %failure.error, "Mail sender slot skipped");
                    registry.set_status(name, SlotStatus::Failed(failure.error));
                }
            }
        }

        info!(
            registered = registry.len(),
            default = primary_owner.as_deref().unwrap_or("<none>"),
            "Mail sender slots resolved"
        );
        Ok(registry)
    }
}

fn check_unique_names(definitions: &[SlotDefinition]) -> Result<(), ProvisioningError> {
    let mut seen = BTreeSet::new();
    for definition in definitions {
        if !seen.insert(definition.name.as_str()) {
            error!(slot = %definition.name, "Slot defined more than once");
            return Err(ProvisioningError::DuplicateRegistration {
                slot: definition.name.clone(),
            });
        }
    }
    Ok(())
}
