//! Centralized Testing Utilities
//!
//! In-memory collaborators for exercising the resolution pass without a
//! directory service or an SMTP server. Available with the `test-utils`
//! feature flag.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::errors::{DirectoryError, TransportError};
use crate::domain::session::{MailSession, SessionOrigin};
use crate::domain::settings::SlotSettings;
use crate::ports::outbound::{SessionDirectory, TransportClient, TransportFactory};

/// A session directory backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    sessions: HashMap<String, MailSession>,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session with only a host under `name`.
    #[must_use]
    pub fn with_session(mut self, name: &str, host: &str) -> Self {
        self.sessions
            .insert(name.to_string(), MailSession::registered(name, host));
        self
    }
}

impl SessionDirectory for InMemoryDirectory {
    fn lookup(&self, name: &str) -> Result<MailSession, DirectoryError> {
        self.sessions
            .get(name)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Client produced by [`MockTransportFactory`].
#[derive(Debug)]
pub struct MockClient {
    host: String,
    default_encoding: String,
    origin: SessionOrigin,
    reachable: bool,
    probes: Arc<AtomicUsize>,
}

impl MockClient {
    /// Host the client would connect to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Encoding taken from slot settings.
    pub fn default_encoding(&self) -> &str {
        &self.default_encoding
    }

    /// Origin of the wrapped session.
    pub fn origin(&self) -> &SessionOrigin {
        &self.origin
    }
}

impl TransportClient for MockClient {
    fn test_connection(&self) -> Result<(), TransportError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if self.reachable {
            Ok(())
        } else {
            Err(TransportError::Connection(format!(
                "{}: connection refused",
                self.host
            )))
        }
    }
}

/// Transport factory that records calls and fails on configured hosts.
#[derive(Debug, Default)]
pub struct MockTransportFactory {
    unreachable: BTreeSet<String>,
    rejected: BTreeSet<String>,
    clients_built: AtomicUsize,
    probes: Arc<AtomicUsize>,
}

impl MockTransportFactory {
    /// Create a factory where every host is reachable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clients for `host` fail their connection probe.
    #[must_use]
    pub fn with_unreachable(mut self, host: &str) -> Self {
        self.unreachable.insert(host.to_string());
        self
    }

    /// Building a client for `host` fails.
    #[must_use]
    pub fn with_rejected(mut self, host: &str) -> Self {
        self.rejected.insert(host.to_string());
        self
    }

    /// Number of clients built so far.
    pub fn clients_built(&self) -> usize {
        self.clients_built.load(Ordering::SeqCst)
    }

    /// Number of connection probes run by clients of this factory.
    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl TransportFactory for MockTransportFactory {
    type Client = MockClient;

    fn build_client(
        &self,
        session: &MailSession,
        settings: &SlotSettings,
    ) -> Result<MockClient, TransportError> {
        let host = session
            .host
            .clone()
            .ok_or_else(|| TransportError::InvalidParameter("session has no host".to_string()))?;
        if self.rejected.contains(&host) {
            return Err(TransportError::InvalidParameter(format!(
                "host '{}' rejected",
                host
            )));
        }

        self.clients_built.fetch_add(1, Ordering::SeqCst);
        Ok(MockClient {
            reachable: !self.unreachable.contains(&host),
            host,
            default_encoding: settings.default_encoding.clone(),
            origin: session.origin.clone(),
            probes: Arc::clone(&self.probes),
        })
    }
}
