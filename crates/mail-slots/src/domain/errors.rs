//! # Provisioning Errors
//!
//! Error types for binding, collaborator calls and the resolution pass.
//! All variants carry owned strings so they can be recorded in slot status.

use thiserror::Error;

/// A configuration value could not be converted to its target type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    /// The value has the wrong type for the key.
    #[error("Invalid value '{value}' for '{key}': expected {expected}")]
    TypeMismatch {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Errors from the session directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// No session is registered under the name.
    #[error("Unable to find session in directory location '{name}'")]
    NotFound { name: String },
}

/// Errors from the transport factory or client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// A session or settings parameter is invalid for this transport.
    #[error("Invalid transport parameter: {0}")]
    InvalidParameter(String),

    /// The referenced SSL bundle does not exist or cannot be used.
    #[error("SSL bundle '{name}' unusable: {reason}")]
    SslBundle { name: String, reason: String },

    /// Connecting to the server failed.
    #[error("Mail server is not available: {0}")]
    Connection(String),
}

/// Stage of the slot state machine at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStage {
    /// Binding settings from configuration.
    SettingsBound,
    /// Obtaining the session.
    SessionBuilt,
    /// Wrapping the session into a client.
    ClientBuilt,
    /// Probing the server.
    Validated,
    /// Inserting into the registry.
    Registered,
}

/// Errors of the resolution pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProvisioningError {
    /// A slot's configuration could not be bound. Never fatal.
    #[error("[{slot}] configuration binding failed: {source}")]
    Binding {
        slot: String,
        #[source]
        source: BindingError,
    },

    /// The directory name could not be resolved.
    #[error("[{slot}] session '{jndi_name}' could not be resolved: {source}")]
    ResourceResolution {
        slot: String,
        jndi_name: String,
        #[source]
        source: DirectoryError,
    },

    /// The factory rejected the session or settings.
    #[error("[{slot}] construction failed at {stage:?}: {source}")]
    Construction {
        slot: String,
        stage: SlotStage,
        #[source]
        source: TransportError,
    },

    /// The startup connectivity probe failed.
    #[error("[{slot}] connection validation failed: {source}")]
    Validation {
        slot: String,
        #[source]
        source: TransportError,
    },

    /// A slot name was defined or registered twice. Always fatal.
    #[error("[{slot}] slot is already registered")]
    DuplicateRegistration { slot: String },
}

impl ProvisioningError {
    /// Name of the slot the error belongs to.
    #[must_use]
    pub fn slot(&self) -> &str {
        match self {
            Self::Binding { slot, .. }
            | Self::ResourceResolution { slot, .. }
            | Self::Construction { slot, .. }
            | Self::Validation { slot, .. }
            | Self::DuplicateRegistration { slot } => slot,
        }
    }

    /// Stage at which the error occurred.
    #[must_use]
    pub fn stage(&self) -> SlotStage {
        match self {
            Self::Binding { .. } => SlotStage::SettingsBound,
            Self::ResourceResolution { .. } => SlotStage::SessionBuilt,
            Self::Construction { stage, .. } => *stage,
            Self::Validation { .. } => SlotStage::Validated,
            Self::DuplicateRegistration { .. } => SlotStage::Registered,
        }
    }

    /// Whether the error aborts the pass for a slot that would become primary.
    #[must_use]
    pub fn escalates_for_primary(&self) -> bool {
        !matches!(self, Self::Binding { .. })
    }

    /// Whether the error aborts the pass for any slot.
    #[must_use]
    pub fn is_always_fatal(&self) -> bool {
        matches!(self, Self::DuplicateRegistration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_and_stage_accessors() {
        let err = ProvisioningError::ResourceResolution {
            slot: "secondary".to_string(),
            jndi_name: "bad/Name".to_string(),
            source: DirectoryError::NotFound {
                name: "bad/Name".to_string(),
            },
        };
        assert_eq!(err.slot(), "secondary");
        assert_eq!(err.stage(), SlotStage::SessionBuilt);
        assert!(err.escalates_for_primary());
        assert!(!err.is_always_fatal());
    }

    #[test]
    fn test_binding_never_escalates() {
        let err = ProvisioningError::Binding {
            slot: "primary".to_string(),
            source: BindingError::TypeMismatch {
                key: "multiple-mail.primary.port".to_string(),
                value: "abc".to_string(),
                expected: "port number",
            },
        };
        assert!(!err.escalates_for_primary());
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_duplicate_is_always_fatal() {
        let err = ProvisioningError::DuplicateRegistration {
            slot: "primary".to_string(),
        };
        assert!(err.is_always_fatal());
        assert_eq!(err.stage(), SlotStage::Registered);
    }

    #[test]
    fn test_validation_message() {
        let err = ProvisioningError::Validation {
            slot: "tertiary".to_string(),
            source: TransportError::Connection("connection refused".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "[tertiary] connection validation failed: Mail server is not available: connection refused"
        );
    }
}
