//! # Mail Transport
//!
//! Concrete collaborators for `mail-slots`:
//!
//! - [`SmtpTransportFactory`]: builds `lettre` SMTP senders from sessions
//! - [`StaticSessionDirectory`]: sessions registered by name ahead of time
//! - [`SslBundleRegistry`]: named TLS trust settings
//!
//! [`TransportFile`] loads the directory and the bundles from the runtime
//! configuration file.

pub mod bundles;
pub mod directory;
pub mod file;
pub mod smtp;

pub use bundles::{SslBundle, SslBundleRegistry};
pub use directory::{DirectoryEntry, StaticSessionDirectory};
pub use file::TransportFile;
pub use smtp::{SmtpMailSender, SmtpTransportFactory, TlsMode, DEFAULT_TIMEOUT};
