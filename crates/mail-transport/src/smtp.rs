//! # SMTP Transport
//!
//! [`TransportFactory`] implementation on top of `lettre`.
//!
//! ## Session property mapping
//!
//! | Property | Effect |
//! |----------|--------|
//! | `mail.<protocol>.ssl.enable=true` | implicit TLS (also implied by `smtps`) |
//! | `mail.<protocol>.starttls.required=true` | STARTTLS, refuse plaintext |
//! | `mail.<protocol>.starttls.enable=true` | STARTTLS when offered |
//! | `mail.<protocol>.connectiontimeout` | connect timeout in milliseconds |
//! | `mail.<protocol>.port` | port, when the session has none |
//!
//! Without an explicit port, `smtp` connects to 25 and implicit TLS to 465.
//! Without `connectiontimeout`, connects and reads time out after 60 seconds.

use std::fmt;
use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::SmtpTransport;
use mail_slots::{
    MailSession, SessionOrigin, SlotSettings, TransportClient, TransportError, TransportFactory,
};
use tracing::debug;

use crate::bundles::SslBundleRegistry;

const SMTP_PORT: u16 = 25;
const SMTPS_PORT: u16 = 465;

/// Same as lettre's own default; a sender never runs without a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How the client secures its connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Plaintext.
    None,
    /// STARTTLS when the server offers it.
    Opportunistic,
    /// STARTTLS, fail otherwise.
    Required,
    /// TLS from the first byte.
    Implicit,
}

impl TlsMode {
    fn from_session(session: &MailSession) -> Self {
        if session.protocol == "smtps" || session.flag("ssl.enable") {
            TlsMode::Implicit
        } else if session.flag("starttls.required") {
            TlsMode::Required
        } else if session.flag("starttls.enable") {
            TlsMode::Opportunistic
        } else {
            TlsMode::None
        }
    }

    fn into_tls(self, parameters: TlsParameters) -> Tls {
        match self {
            TlsMode::None => Tls::None,
            TlsMode::Opportunistic => Tls::Opportunistic(parameters),
            TlsMode::Required => Tls::Required(parameters),
            TlsMode::Implicit => Tls::Wrapper(parameters),
        }
    }
}

/// A provisioned SMTP sender.
#[derive(Clone)]
pub struct SmtpMailSender {
    transport: SmtpTransport,
    host: String,
    port: u16,
    tls: TlsMode,
    timeout: Duration,
    default_encoding: String,
    origin: SessionOrigin,
}

impl SmtpMailSender {
    /// The underlying `lettre` transport, for sending messages.
    pub fn transport(&self) -> &SmtpTransport {
        &self.transport
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn tls(&self) -> TlsMode {
        self.tls
    }

    /// Connect and read timeout of the transport.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Encoding for messages composed for this sender.
    pub fn default_encoding(&self) -> &str {
        &self.default_encoding
    }

    /// Origin of the session the sender was built from.
    pub fn origin(&self) -> &SessionOrigin {
        &self.origin
    }
}

impl fmt::Debug for SmtpMailSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailSender")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .field("default_encoding", &self.default_encoding)
            .field("origin", &self.origin)
            .finish()
    }
}

impl TransportClient for SmtpMailSender {
    fn test_connection(&self) -> Result<(), TransportError> {
        match self.transport.test_connection() {
            Ok(true) => Ok(()),
            Ok(false) => Err(TransportError::Connection(format!(
                "{}:{} did not accept the connection",
                self.host, self.port
            ))),
            Err(e) => Err(TransportError::Connection(format!(
                "{}:{}: {}",
                self.host, self.port, e
            ))),
        }
    }
}

/// Builds [`SmtpMailSender`]s from sessions.
#[derive(Debug, Clone, Default)]
pub struct SmtpTransportFactory {
    ssl_bundles: SslBundleRegistry,
}

impl SmtpTransportFactory {
    pub fn new(ssl_bundles: SslBundleRegistry) -> Self {
        Self { ssl_bundles }
    }

    pub fn ssl_bundles(&self) -> &SslBundleRegistry {
        &self.ssl_bundles
    }

    fn tls_parameters(
        &self,
        session: &MailSession,
        settings: &SlotSettings,
        host: &str,
    ) -> Result<TlsParameters, TransportError> {
        // Directory sessions carry their own trust settings.
        match (&session.origin, settings.ssl.bundle.as_deref()) {
            (SessionOrigin::Explicit, Some(bundle)) => self.ssl_bundles.tls_parameters(bundle, host),
            _ => TlsParameters::new(host.to_string())
                .map_err(|e| TransportError::InvalidParameter(format!("TLS for {}: {}", host, e))),
        }
    }
}

fn connect_timeout(session: &MailSession) -> Result<Duration, TransportError> {
    let Some(raw) = session.property("connectiontimeout") else {
        return Ok(DEFAULT_TIMEOUT);
    };
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| {
            TransportError::InvalidParameter(format!(
                "mail.{}.connectiontimeout must be milliseconds, got '{}'",
                session.protocol, raw
            ))
        })
}

fn session_port(session: &MailSession, tls: TlsMode) -> Result<u16, TransportError> {
    if let Some(port) = session.port {
        return Ok(port);
    }
    match session.property("port") {
        Some(raw) => raw.trim().parse().map_err(|_| {
            TransportError::InvalidParameter(format!(
                "mail.{}.port must be a port number, got '{}'",
                session.protocol, raw
            ))
        }),
        None if tls == TlsMode::Implicit => Ok(SMTPS_PORT),
        None => Ok(SMTP_PORT),
    }
}

impl TransportFactory for SmtpTransportFactory {
    type Client = SmtpMailSender;

    fn build_client(
        &self,
        session: &MailSession,
        settings: &SlotSettings,
    ) -> Result<SmtpMailSender, TransportError> {
        if session.protocol != "smtp" && session.protocol != "smtps" {
            return Err(TransportError::InvalidParameter(format!(
                "unsupported protocol '{}'",
                session.protocol
            )));
        }
        let host = session
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| TransportError::InvalidParameter("session has no host".to_string()))?;

        let tls_mode = TlsMode::from_session(session);
        let port = session_port(session, tls_mode)?;
        let timeout = connect_timeout(session)?;
        let parameters = self.tls_parameters(session, settings, host)?;

        let mut builder = SmtpTransport::builder_dangerous(host)
            .port(port)
            .tls(tls_mode.into_tls(parameters))
            .timeout(Some(timeout));
        if let Some(username) = &session.username {
            let password = session.password.clone().unwrap_or_default();
            builder = builder.credentials(Credentials::new(username.clone(), password));
        }

        debug!(
            host = %host,
            port,
            tls = ?tls_mode,
            timeout_ms = timeout.as_millis() as u64,
            "SMTP transport built"
        );

        Ok(SmtpMailSender {
            transport: builder.build(),
            host: host.to_string(),
            port,
            tls: tls_mode,
            timeout,
            default_encoding: settings.default_encoding.clone(),
            origin: session.origin.clone(),
        })
    }
}
