//! # Strategy Selector
//!
//! Picks exactly one construction strategy from the discriminating keys.

use std::fmt;

use crate::domain::settings::SlotSettings;

/// How a slot's session is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Neither `host` nor `jndi-name` is set.
    Skip,
    /// Resolve a pre-registered session by `jndi-name`.
    DirectoryLookup,
    /// Build the session from the slot's own settings.
    ExplicitProperties,
}

impl Strategy {
    /// Short label used in logs and status output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::DirectoryLookup => "directory-lookup",
            Self::ExplicitProperties => "explicit-properties",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Select the strategy for bound settings.
///
/// `jndi_name` wins over `host` when both are present, so a stale host may be
/// left in place while a slot is switched to directory lookup.
pub fn select(settings: &SlotSettings) -> Strategy {
    match (&settings.jndi_name, &settings.host) {
        (Some(_), _) => Strategy::DirectoryLookup,
        (None, Some(_)) => Strategy::ExplicitProperties,
        (None, None) => Strategy::Skip,
    }
}
