//! Cross-crate integration tests.

pub mod configuration;
pub mod scenarios;
pub mod transport;
