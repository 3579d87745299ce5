//! # Multiple-Mail Test Suite
//!
//! Cross-crate provisioning scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs      # Ordering, precedence and error policy
//!     ├── configuration.rs  # TOML + environment namespace, reserved names
//!     └── transport.rs      # Real SMTP factory and static directory
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mail-tests
//! cargo test -p mail-tests integration::scenarios::
//! ```

pub mod integration;
