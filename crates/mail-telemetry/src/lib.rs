//! # Mail Telemetry
//!
//! Structured logging for the multiple-mail runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mail_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_tracing(&TelemetryConfig::from_env())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `multiple-mail` | Service name in logs |
//! | `MAIL_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `MAIL_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `MAIL_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod setup;

pub use config::TelemetryConfig;
pub use setup::{env_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Log a slot lifecycle event with a consistent `slot` field.
///
/// # Example
///
/// ```rust,ignore
/// use mail_telemetry::log_slot_event;
///
/// log_slot_event!(info, "primary", "Sender ready", host = "smtp.example.com");
/// ```
#[macro_export]
macro_rules! log_slot_event {
    (info, $slot:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(slot = %$slot, $($($field)*,)? $msg)
    };

    (warn, $slot:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(slot = %$slot, $($($field)*,)? $msg)
    };

    (error, $slot:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(slot = %$slot, $($($field)*,)? $msg)
    };

    (debug, $slot:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(slot = %$slot, $($($field)*,)? $msg)
    };
}
