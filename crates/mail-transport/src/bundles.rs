//! # SSL Bundles
//!
//! Named TLS trust settings referenced from `<slot>.ssl.bundle`.
//!
//! ```toml
//! [ssl-bundles.corporate]
//! ca-certificate = "/etc/mail/corporate-ca.pem"
//! accept-invalid-hostnames = false
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use lettre::transport::smtp::client::{Certificate, TlsParameters};
use mail_slots::TransportError;
use serde::Deserialize;
use tracing::debug;

/// TLS trust settings of one bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SslBundle {
    /// PEM file with an additional root certificate.
    #[serde(default)]
    pub ca_certificate: Option<PathBuf>,
    /// Skip certificate verification.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Skip hostname verification.
    #[serde(default)]
    pub accept_invalid_hostnames: bool,
}

impl SslBundle {
    /// Build TLS parameters for connecting to `domain` with this bundle.
    ///
    /// # Errors
    ///
    /// `TransportError::SslBundle` if the certificate cannot be read or parsed.
    pub fn tls_parameters(&self, name: &str, domain: &str) -> Result<TlsParameters, TransportError> {
        let bundle_error = |reason: String| TransportError::SslBundle {
            name: name.to_string(),
            reason,
        };

        let mut builder = TlsParameters::builder(domain.to_string())
            .dangerous_accept_invalid_certs(self.accept_invalid_certs)
            .dangerous_accept_invalid_hostnames(self.accept_invalid_hostnames);

        if let Some(path) = &self.ca_certificate {
            let pem = fs::read(path)
                .map_err(|e| bundle_error(format!("{}: {}", path.display(), e)))?;
            let certificate = Certificate::from_pem(&pem)
                .map_err(|e| bundle_error(format!("{}: {}", path.display(), e)))?;
            builder = builder.add_root_certificate(certificate);
        }

        builder.build().map_err(|e| bundle_error(e.to_string()))
    }
}

/// Bundles by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslBundleRegistry {
    bundles: BTreeMap<String, SslBundle>,
}

impl SslBundleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bundle under `name`.
    #[must_use]
    pub fn with_bundle(mut self, name: impl Into<String>, bundle: SslBundle) -> Self {
        self.bundles.insert(name.into(), bundle);
        self
    }

    /// Bundle registered under `name`.
    pub fn get(&self, name: &str) -> Option<&SslBundle> {
        self.bundles.get(name)
    }

    /// TLS parameters for `domain` from the bundle `name`.
    ///
    /// # Errors
    ///
    /// `TransportError::SslBundle` if no such bundle exists or it is unusable.
    pub fn tls_parameters(&self, name: &str, domain: &str) -> Result<TlsParameters, TransportError> {
        let bundle = self.get(name).ok_or_else(|| TransportError::SslBundle {
            name: name.to_string(),
            reason: "no such bundle".to_string(),
        })?;
        debug!(bundle = %name, domain = %domain, "Applying SSL bundle");
        bundle.tls_parameters(name, domain)
    }

    /// Number of bundles.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether no bundle is registered.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl From<BTreeMap<String, SslBundle>> for SslBundleRegistry {
    fn from(bundles: BTreeMap<String, SslBundle>) -> Self {
        Self { bundles }
    }
}
