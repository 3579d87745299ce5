//! # Validator Attachment
//!
//! Optional startup probe, gated per slot by `test-connection`. One
//! synchronous attempt, no retry; the connect timeout is the client's own.

use tracing::{debug, info};

use crate::domain::errors::ProvisioningError;
use crate::ports::outbound::TransportClient;

/// Probe `client` once.
///
/// # Errors
///
/// Returns `ProvisioningError::Validation` if the probe fails.
pub fn validate<C: TransportClient + ?Sized>(slot: &str, client: &C) -> Result<(), ProvisioningError> {
    debug!(slot = %slot, "Probing mail server");
    client
        .test_connection()
        .map_err(|source| ProvisioningError::Validation {
            slot: slot.to_string(),
            source,
        })?;
    info!(slot = %slot, "Mail server connection validated");
    Ok(())
}
