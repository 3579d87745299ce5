//! JSON summary of a resolved registry.

use mail_slots::{SlotRegistry, SlotStatus};
use serde::Serialize;

/// One slot in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSummary {
    pub name: String,
    /// `registered`, `skipped` or `failed`.
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<&'static str>,
    pub primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub validated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of the resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub root_prefix: String,
    pub default_sender: Option<String>,
    pub slots: Vec<SlotSummary>,
}

impl RegistrySummary {
    pub fn from_registry<C>(root_prefix: &str, registry: &SlotRegistry<C>) -> Self {
        let slots = registry
            .statuses()
            .iter()
            .map(|(name, status)| {
                let resource = registry.get(name);
                let (state, detail) = match status {
                    SlotStatus::Registered { .. } => ("registered", None),
                    SlotStatus::Skipped(reason) => ("skipped", Some(format!("{:?}", reason))),
                    SlotStatus::Failed(err) => ("failed", Some(err.to_string())),
                };
                SlotSummary {
                    name: name.clone(),
                    state,
                    qualifier: resource.map(|r| r.sender_name.clone()),
                    strategy: resource.map(|r| r.strategy.label()),
                    primary: resource.is_some_and(|r| r.is_primary),
                    host: resource.and_then(|r| r.session.host.clone()),
                    port: resource.and_then(|r| r.session.port),
                    validated: resource.is_some_and(|r| r.validated),
                    detail,
                }
            })
            .collect();

        Self {
            root_prefix: root_prefix.to_string(),
            default_sender: registry.primary().map(|r| r.slot_name.clone()),
            slots,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
