//! # Outbound Ports (Driven Ports / SPI)
//!
//! The transport library and the session directory are external
//! collaborators; the engine only selects and sequences their calls.

use crate::domain::errors::{DirectoryError, TransportError};
use crate::domain::session::MailSession;
use crate::domain::settings::SlotSettings;

/// Directory of pre-registered sessions, addressed by name.
pub trait SessionDirectory: Send + Sync {
    /// Resolve a session registered under `name`.
    ///
    /// # Errors
    /// * `DirectoryError::NotFound` - Nothing is registered under `name`
    fn lookup(&self, name: &str) -> Result<MailSession, DirectoryError>;
}

/// A constructed transport client.
pub trait TransportClient: Send + Sync {
    /// Connect to the server and disconnect again.
    ///
    /// A single blocking attempt bounded by the client's own connect timeout.
    fn test_connection(&self) -> Result<(), TransportError>;
}

/// Builds sessions and clients for the explicit-properties path and wraps
/// directory sessions into clients.
pub trait TransportFactory: Send + Sync {
    /// The client type this factory produces.
    type Client: TransportClient;

    /// Build a session directly from slot settings.
    fn build_session(&self, settings: &SlotSettings) -> Result<MailSession, TransportError> {
        Ok(MailSession::from_settings(settings))
    }

    /// Wrap a session into a client.
    ///
    /// For directory sessions only the default encoding is taken from
    /// `settings`; connection parameters come from the session.
    fn build_client(
        &self,
        session: &MailSession,
        settings: &SlotSettings,
    ) -> Result<Self::Client, TransportError>;
}
