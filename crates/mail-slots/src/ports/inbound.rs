//! # Inbound Ports (Driving Ports / API)
//!
//! What downstream consumers see after the resolution pass.

use std::sync::Arc;

/// Named lookup of provisioned senders.
pub trait MailSenderProvider<C>: Send + Sync {
    /// Sender of the slot `name`.
    fn sender(&self, name: &str) -> Option<Arc<C>>;

    /// Sender by its qualifier, e.g. `secondaryMailSender`.
    fn sender_by_qualifier(&self, qualifier: &str) -> Option<Arc<C>>;

    /// The unqualified default sender, if a slot claimed primary.
    fn default_sender(&self) -> Option<Arc<C>>;

    /// Names of provisioned slots in resolution order.
    fn slot_names(&self) -> Vec<String>;
}
