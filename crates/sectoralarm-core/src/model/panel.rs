// ── Panel records ──

use serde::{Deserialize, Serialize};

use super::device::Lock;
use super::history::HistoryEvent;

/// What a site is capable of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub site_id: String,
    pub name: String,
    pub partial_arming_available: bool,
    pub annex_arming_available: bool,
    pub locks_available: bool,
    pub temperatures_available: bool,
    pub cameras_available: bool,
    pub smart_plugs_available: bool,
}

/// Current arming state of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub site_id: String,
    pub name: String,
    /// `armed`, `partialArmed`, `disarmed`, or whatever new value the
    /// vendor introduces.
    pub armed_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annex_armed_status: Option<String>,
    pub partial_arming_available: bool,
    pub annex_arming_available: bool,
    pub locks_available: bool,
    #[serde(default)]
    pub locks: Vec<Lock>,
    /// Actor of the most recent history event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction_time: Option<String>,
}

impl Status {
    /// Replace the overview's lock summary with a full lock listing.
    #[must_use]
    pub fn with_locks(self, locks: Vec<Lock>) -> Self {
        Self { locks, ..self }
    }

    /// Attach who last touched the panel, and when.
    #[must_use]
    pub fn with_last_interaction(self, event: Option<HistoryEvent>) -> Self {
        match event {
            Some(event) => Self {
                last_interaction_by: event.user,
                last_interaction_time: event.time,
                ..self
            },
            None => self,
        }
    }
}
