//! # Mail Slots
//!
//! Provisions several independently configured outbound mail senders
//! ("slots": primary, secondary, ... senary) from one configuration namespace.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Slot definitions, bound settings, strategy selection, errors
//! - **Config Layer** (`config/`): Layered property sources and the per-slot binder
//! - **Ports Layer** (`ports/`): Traits for the session directory, the transport factory
//!   and the produced sender lookup
//! - **Service Layer** (`service/`): Slot resolver, ordering controller, validator attachment
//! - **Registry** (`registry.rs`): Create-once storage of resolved senders
//!
//! ## Resolution Flow
//!
//! ```text
//! definitions (sorted by priority)
//!        │
//!        ▼
//!  ┌──────────────┐   skip    ┌──────────┐
//!  │ enabled? /   │──────────►│ Skipped  │
//!  │ bind settings│           └──────────┘
//!  └──────┬───────┘
//!         ▼
//!  ┌──────────────┐  DirectoryLookup    ┌────────────────────┐
//!  │   select()   │────────────────────►│ directory.lookup() │──┐
//!  └──────┬───────┘                     └────────────────────┘  │
//!         │ ExplicitProperties                                   │
//!         ▼                                                      ▼
//!  factory.build_session() ──► factory.build_client() ──► [validate] ──► SlotRegistry
//! ```
//!
//! ## Error Policy
//!
//! Failures of a non-primary slot are logged and isolated. Failures of the
//! slot that would become primary, and duplicate slot definitions, abort the
//! whole pass.

pub mod config;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export public API
pub use config::{
    bind_slot_settings, ConfigError, ConfigNamespace, EnvSource, MapSource, PropertySource,
    TomlSource,
};
pub use domain::definition::{standard_slots, SlotDefinition, DEFAULT_ROOT_PREFIX};
pub use domain::errors::{
    BindingError, DirectoryError, ProvisioningError, SlotStage, TransportError,
};
pub use domain::session::{MailSession, SessionOrigin};
pub use domain::settings::{SlotSettings, SslSettings};
pub use domain::strategy::{select, Strategy};
pub use ports::inbound::MailSenderProvider;
pub use ports::outbound::{SessionDirectory, TransportClient, TransportFactory};
pub use registry::{ResolvedResource, SkipReason, SlotRegistry, SlotStatus};
pub use service::{validate, ProvisioningService};
