// ── Action results ──

use serde::{Deserialize, Serialize};

/// Panel state reported back after an arm/disarm command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub status: String,
    pub name: String,
    pub armed_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annex_armed_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockActionResult {
    pub status: String,
}
