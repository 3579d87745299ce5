//! # Slot Definitions
//!
//! Static description of one named sender slot. Definitions are fixed at
//! process start; adding a slot is a data change, not a code change.

/// Root of the configuration namespace used by [`standard_slots`].
pub const DEFAULT_ROOT_PREFIX: &str = "multiple-mail";

/// Names of the six standard slots, in resolution order.
const STANDARD_SLOT_NAMES: [&str; 6] = [
    "primary",
    "secondary",
    "tertiary",
    "quaternary",
    "quinary",
    "senary",
];

/// One named slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDefinition {
    /// Unique slot name (e.g. `primary`).
    pub name: String,
    /// Configuration namespace for this slot (e.g. `multiple-mail.primary`).
    pub property_prefix: String,
    /// Resolution order; lower resolves first.
    pub priority: u32,
    /// Whether this slot's sender may be marked as the unqualified default
    /// when configuration does not say otherwise.
    pub allows_override_primary: bool,
}

impl SlotDefinition {
    /// Create a definition under `root`, i.e. with prefix `<root>.<name>`.
    pub fn new(root: &str, name: impl Into<String>, priority: u32) -> Self {
        let name = name.into();
        let property_prefix = if root.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", root, name)
        };
        Self {
            name,
            property_prefix,
            priority,
            allows_override_primary: false,
        }
    }

    /// Mark this slot as eligible for primary designation by default.
    #[must_use]
    pub fn primary_eligible(mut self) -> Self {
        self.allows_override_primary = true;
        self
    }

    /// Qualifier of the bound settings (`<name>MailProperties`).
    pub fn properties_name(&self) -> String {
        format!("{}MailProperties", self.name)
    }

    /// Qualifier of the session (`<name>MailSession`).
    pub fn session_name(&self) -> String {
        format!("{}MailSession", self.name)
    }

    /// Qualifier of the sender (`<name>MailSender`).
    pub fn sender_name(&self) -> String {
        format!("{}MailSender", self.name)
    }

    /// Full configuration key for `suffix` inside this slot's namespace.
    pub fn key(&self, suffix: &str) -> String {
        format!("{}.{}", self.property_prefix, suffix)
    }
}

/// The six standard slots (primary..senary) under `root`.
///
/// Only `primary` is primary-eligible by default.
pub fn standard_slots(root: &str) -> Vec<SlotDefinition> {
    STANDARD_SLOT_NAMES
        .iter()
        .zip(0u32..)
        .map(|(name, priority)| {
            let definition = SlotDefinition::new(root, *name, priority);
            if priority == 0 {
                definition.primary_eligible()
            } else {
                definition
            }
        })
        .collect()
}
