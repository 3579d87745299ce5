//! # Multiple Mail Runtime
//!
//! Provisions the configured mail sender slots and holds them until Ctrl+C.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`MAIL_LOG_LEVEL`, `MAIL_JSON_LOGS`, ...)
//! 2. Load `multiple-mail.toml` and layer the environment over it
//! 3. Resolve the six standard slots in priority order
//! 4. Print the registry status
//! 5. Wait for shutdown (unless `--check`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use mail_runtime::{MailRuntime, RegistrySummary, RuntimeConfig};
use mail_telemetry::{init_tracing, TelemetryConfig};

/// Multiple Mail: provisions named outbound mail senders
#[derive(Parser, Debug)]
#[command(name = "mail-runtime")]
#[command(about = "Provision named outbound mail senders from one configuration namespace")]
struct Args {
    /// Configuration file (TOML), default `multiple-mail.toml`
    #[arg(short, long, env = "MULTIPLE_MAIL_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration root of the slot keys
    #[arg(long, default_value = mail_slots::DEFAULT_ROOT_PREFIX)]
    root_prefix: String,

    /// Provision, print the status and exit
    #[arg(long)]
    check: bool,

    /// Print the registry summary as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_runtime_config(self) -> RuntimeConfig {
        let config = match self.config {
            Some(path) => RuntimeConfig::default().with_config_file(path),
            None => RuntimeConfig::default(),
        };
        RuntimeConfig {
            check_only: self.check,
            json_summary: self.json,
            ..config.with_root_prefix(self.root_prefix)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    let config = args.into_runtime_config();
    let runtime = MailRuntime::new(config.clone());
    let registry = runtime.provision()?;

    registry.print_status();

    if config.json_summary {
        let summary = RegistrySummary::from_registry(&config.root_prefix, &*registry);
        println!("{}", summary.to_json()?);
    }

    if config.check_only {
        return Ok(());
    }

    info!(senders = registry.len(), "Mail senders ready. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["mail-runtime"]);
        let config = args.into_runtime_config();
        assert_eq!(config.root_prefix, "multiple-mail");
        assert!(!config.check_only);
    }

    #[test]
    fn test_explicit_config_is_required() {
        let args = Args::parse_from([
            "mail-runtime",
            "--config",
            "/etc/mail.toml",
            "--check",
            "--json",
        ]);
        let config = args.into_runtime_config();
        assert_eq!(config.config_path, PathBuf::from("/etc/mail.toml"));
        assert!(config.config_required);
        assert!(config.check_only && config.json_summary);
    }
}
