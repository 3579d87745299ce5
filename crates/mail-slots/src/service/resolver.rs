//! # Slot Resolver
//!
//! Drives one slot through its state machine:
//!
//! ```text
//! Unresolved ──► Skipped
//!     │
//!     └──► SettingsBound ──► StrategyChosen ──► SessionBuilt ──► ClientBuilt ──► [Validated] ──► Registered
//! ```
//!
//! Registration itself is done by the ordering controller.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::config::{bind_slot_settings, ConfigNamespace};
use crate::domain::definition::SlotDefinition;
use crate::domain::errors::{ProvisioningError, SlotStage};
use crate::domain::strategy::{select, Strategy};
use crate::ports::outbound::{SessionDirectory, TransportFactory};
use crate::registry::{ResolvedResource, SkipReason};
use crate::service::validator::validate;

/// Non-failing outcome of one slot.
#[derive(Debug)]
pub(crate) enum SlotResolution<C> {
    Skipped(SkipReason),
    Resolved(ResolvedResource<C>),
}

/// Failure of one slot, with what the controller needs to apply policy.
#[derive(Debug)]
pub(crate) struct SlotFailure {
    pub error: ProvisioningError,
    /// The slot would have become the default sender.
    pub primary_candidate: bool,
}

impl SlotFailure {
    fn new(error: ProvisioningError, primary_candidate: bool) -> Self {
        Self {
            error,
            primary_candidate,
        }
    }

    /// Whether this failure aborts the whole pass.
    pub fn is_fatal(&self) -> bool {
        self.error.is_always_fatal() || (self.primary_candidate && self.error.escalates_for_primary())
    }
}

pub(crate) struct SlotResolver<'a, D, F> {
    directory: &'a D,
    factory: &'a F,
}

impl<'a, D, F> SlotResolver<'a, D, F>
where
    D: SessionDirectory,
    F: TransportFactory,
{
    pub fn new(directory: &'a D, factory: &'a F) -> Self {
        Self { directory, factory }
    }

    /// Resolve `definition`. `primary_owner` is the slot that already holds
    /// the default designation, if any.
    #[instrument(name = "resolve_slot", skip_all, fields(slot = %definition.name))]
    pub fn resolve(
        &self,
        definition: &SlotDefinition,
        config: &ConfigNamespace,
        primary_owner: Option<&str>,
    ) -> Result<SlotResolution<F::Client>, SlotFailure> {
        let slot = definition.name.as_str();

        // SettingsBound
        let settings = match bind_slot_settings(config, &definition.property_prefix) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!("No keys under {}, skipping", definition.property_prefix);
                return Ok(SlotResolution::Skipped(SkipReason::Unconfigured));
            }
            Err(source) => {
                let error = ProvisioningError::Binding {
                    slot: slot.to_string(),
                    source,
                };
                return Err(SlotFailure::new(error, false));
            }
        };

        // StrategyChosen
        let strategy = select(&settings);
        if strategy == Strategy::Skip {
            debug!("Neither host nor jndi-name configured, skipping");
            return Ok(SlotResolution::Skipped(SkipReason::NoDiscriminator));
        }
        debug!(strategy = %strategy, "Strategy chosen");

        let eligible = settings.primary_eligible(definition.allows_override_primary);
        let is_primary = eligible && primary_owner.is_none();
        if let (true, Some(owner)) = (eligible, primary_owner) {
            warn!(
                owner = %owner,
                "Slot is primary-eligible but the default sender is already claimed"
            );
        }

        // SessionBuilt
        let session = match (strategy, settings.jndi_name.as_deref()) {
            (Strategy::DirectoryLookup, Some(name)) => {
                debug!(jndi_name = %name, "Looking up session");
                self.directory.lookup(name).map_err(|source| {
                    SlotFailure::new(
                        ProvisioningError::ResourceResolution {
                            slot: slot.to_string(),
                            jndi_name: name.to_string(),
                            source,
                        },
                        is_primary,
                    )
                })?
            }
            _ => {
                debug!(host = ?settings.host, "Building session from settings");
                self.factory.build_session(&settings).map_err(|source| {
                    SlotFailure::new(
                        ProvisioningError::Construction {
                            slot: slot.to_string(),
                            stage: SlotStage::SessionBuilt,
                            source,
                        },
                        is_primary,
                    )
                })?
            }
        };

        // ClientBuilt
        let client = self
            .factory
            .build_client(&session, &settings)
            .map_err(|source| {
                SlotFailure::new(
                    ProvisioningError::Construction {
                        slot: slot.to_string(),
                        stage: SlotStage::ClientBuilt,
                        source,
                    },
                    is_primary,
                )
            })?;

        // Validated
        if settings.test_connection {
            validate(slot, &client).map_err(|error| SlotFailure::new(error, is_primary))?;
        }

        Ok(SlotResolution::Resolved(ResolvedResource {
            slot_name: slot.to_string(),
            sender_name: definition.sender_name(),
            strategy,
            session,
            client: Arc::new(client),
            is_primary,
            validated: settings.test_connection,
        }))
    }
}
