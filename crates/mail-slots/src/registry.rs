//! # Slot Registry
//!
//! Create-once storage of resolved senders, keyed by slot name, in
//! resolution order. After the resolution pass the registry is only read,
//! so it can be shared behind an `Arc` without locking.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      SlotRegistry                        │
//! │                                                          │
//! │  ┌──────────┐  ┌───────────┐  ┌──────────┐  ┌────────┐   │
//! │  │ primary  │  │ secondary │  │ tertiary │  │  ...   │   │
//! │  │ DEFAULT  │  │ REGISTERED│  │ SKIPPED  │  │        │   │
//! │  └──────────┘  └───────────┘  └──────────┘  └────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use crate::domain::errors::ProvisioningError;
use crate::domain::session::MailSession;
use crate::domain::strategy::Strategy;
use crate::ports::inbound::MailSenderProvider;

/// A provisioned sender.
#[derive(Debug)]
pub struct ResolvedResource<C> {
    /// Slot name.
    pub slot_name: String,
    /// Sender qualifier (`<slot>MailSender`).
    pub sender_name: String,
    /// Strategy that produced the session.
    pub strategy: Strategy,
    /// The session the client wraps.
    pub session: MailSession,
    /// The transport client.
    pub client: Arc<C>,
    /// Whether this is the unqualified default sender.
    pub is_primary: bool,
    /// Whether the startup probe ran and succeeded.
    pub validated: bool,
}

impl<C> Clone for ResolvedResource<C> {
    fn clone(&self) -> Self {
        Self {
            slot_name: self.slot_name.clone(),
            sender_name: self.sender_name.clone(),
            strategy: self.strategy,
            session: self.session.clone(),
            client: Arc::clone(&self.client),
            is_primary: self.is_primary,
            validated: self.validated,
        }
    }
}

/// Why a slot produced no sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `<root>.enabled` turned the feature off.
    FeatureDisabled,
    /// No keys under the slot prefix.
    Unconfigured,
    /// Keys present, but neither `host` nor `jndi-name`.
    NoDiscriminator,
    /// The slot name was already claimed outside the engine.
    AlreadyRegistered,
}

/// Terminal state of one slot after the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// No sender, by configuration.
    Skipped(SkipReason),
    /// No sender, because of an isolated error.
    Failed(ProvisioningError),
    /// Sender provisioned.
    Registered {
        /// Strategy used.
        strategy: Strategy,
        /// Whether the slot is the default.
        primary: bool,
    },
}

/// Registry of provisioned senders.
#[derive(Debug)]
pub struct SlotRegistry<C> {
    resources: Vec<ResolvedResource<C>>,
    status: Vec<(String, SlotStatus)>,
    reserved: BTreeSet<String>,
}

impl<C> Default for SlotRegistry<C> {
    fn default() -> Self {
        Self {
            resources: Vec::new(),
            status: Vec::new(),
            reserved: BTreeSet::new(),
        }
    }
}

impl<C> SlotRegistry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with slot names already claimed elsewhere.
    pub fn with_reserved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.reserve(name);
        }
        registry
    }

    /// Claim a slot name outside the engine; the engine will skip that slot.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Whether `name` is reserved or already holds a sender.
    pub fn is_claimed(&self, name: &str) -> bool {
        self.reserved.contains(name) || self.get(name).is_some()
    }

    /// Insert a resolved sender.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if the name is already claimed; the
    /// existing entry is never overwritten.
    pub fn register(&mut self, resource: ResolvedResource<C>) -> Result<(), ProvisioningError> {
        if self.is_claimed(&resource.slot_name) {
            return Err(ProvisioningError::DuplicateRegistration {
                slot: resource.slot_name,
            });
        }

        info!(
            slot = %resource.slot_name,
            strategy = %resource.strategy,
            primary = resource.is_primary,
            "[Registry] Registering mail sender"
        );
        self.set_status(
            &resource.slot_name,
            SlotStatus::Registered {
                strategy: resource.strategy,
                primary: resource.is_primary,
            },
        );
        self.resources.push(resource);
        Ok(())
    }

    /// Record the terminal state of a slot.
    pub(crate) fn set_status(&mut self, name: &str, status: SlotStatus) {
        match self.status.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = status,
            None => self.status.push((name.to_string(), status)),
        }
    }

    /// Resolved sender of slot `name`.
    pub fn get(&self, name: &str) -> Option<&ResolvedResource<C>> {
        self.resources.iter().find(|r| r.slot_name == name)
    }

    /// Resolved sender by qualifier (`<slot>MailSender`).
    pub fn get_by_qualifier(&self, qualifier: &str) -> Option<&ResolvedResource<C>> {
        self.resources.iter().find(|r| r.sender_name == qualifier)
    }

    /// The default sender, if any slot claimed primary.
    pub fn primary(&self) -> Option<&ResolvedResource<C>> {
        self.resources.iter().find(|r| r.is_primary)
    }

    /// Resolved senders in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedResource<C>> {
        self.resources.iter()
    }

    /// Number of resolved senders.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no sender was resolved.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Status of slot `name`, if the pass saw it.
    pub fn status(&self, name: &str) -> Option<&SlotStatus> {
        self.status.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Status of every slot the pass saw, in resolution order.
    pub fn statuses(&self) -> &[(String, SlotStatus)] {
        &self.status
    }

    /// Log the registry status table.
    pub fn print_status(&self) {
        info!("===========================================");
        info!("  MAIL SENDER REGISTRY STATUS");
        info!("===========================================");

        for (name, status) in &self.status {
            let (icon, detail) = match status {
                SlotStatus::Registered { strategy, primary } => (
                    "✅",
                    format!(
                        "{}{}",
                        strategy.label(),
                        if *primary { " [DEFAULT]" } else { "" }
                    ),
                ),
                SlotStatus::Skipped(reason) => ("⏸️ ", format!("skipped ({:?})", reason)),
                SlotStatus::Failed(err) => ("❌", err.to_string()),
            };
            info!("  {} {:12} {}", icon, name, detail);
        }

        info!("===========================================");
    }
}

impl<C: Send + Sync> MailSenderProvider<C> for SlotRegistry<C> {
    fn sender(&self, name: &str) -> Option<Arc<C>> {
        self.get(name).map(|r| Arc::clone(&r.client))
    }

    fn sender_by_qualifier(&self, qualifier: &str) -> Option<Arc<C>> {
        self.get_by_qualifier(qualifier).map(|r| Arc::clone(&r.client))
    }

    fn default_sender(&self) -> Option<Arc<C>> {
        self.primary().map(|r| Arc::clone(&r.client))
    }

    fn slot_names(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.slot_name.clone()).collect()
    }
}
