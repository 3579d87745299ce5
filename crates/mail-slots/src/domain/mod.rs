//! # Domain Layer
//!
//! Pure provisioning logic, no I/O.

pub mod definition;
pub mod errors;
pub mod session;
pub mod settings;
pub mod strategy;
