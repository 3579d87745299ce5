//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: Sender lookup used by downstream consumers
//! - **Outbound (Driven)**: Session directory and transport library

pub mod inbound;
pub mod outbound;
