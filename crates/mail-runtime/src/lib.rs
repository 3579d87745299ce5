//! # Multiple Mail Runtime
//!
//! Library side of the `mail-runtime` binary.
//!
//! ## Modular Structure
//!
//! - `config` - Runtime parameters (configuration file, root prefix, output mode)
//! - `runtime` - Namespace assembly, collaborator construction, resolution pass
//! - `summary` - Serializable registry summary for `--json`

pub mod config;
pub mod runtime;
pub mod summary;

pub use config::{RuntimeConfig, DEFAULT_CONFIG_FILE};
pub use runtime::{MailRegistry, MailRuntime};
pub use summary::{RegistrySummary, SlotSummary};
