// ── History record ──

use serde::{Deserialize, Serialize};

/// One entry of the panel's event log, newest first.
///
/// Fields the vendor left empty stay `None`; one incomplete event never
/// spoils the rest of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    /// `YYYY-MM-DD HH:mm:ss`, or the vendor text when it is not a timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}
