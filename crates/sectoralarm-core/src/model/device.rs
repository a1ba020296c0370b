// ── Lock and sensor records ──

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lock {
    /// Lock serial; the identifier lock commands take.
    pub lock_id: String,
    pub name: String,
    /// `locked` / `unlocked`, other vendor values verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_level: Option<u32>,
    pub auto_lock_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureSensor {
    pub sensor_id: String,
    pub name: String,
    /// Degrees Celsius, exactly as the vendor reports them.
    pub temperature: String,
}
