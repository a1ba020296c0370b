// Value-level normalization applied by the field rules.

use chrono::{DateTime, NaiveDateTime};

/// Output format of every timestamp.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local ISO-8601 layouts the vendor has been seen to send.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// The vendor's word for "code" in each market it serves.
const CODE_TOKENS: &[&str] = &["kod", "kode", "koodi", "código", "codigo", "code"];

/// Which literal a localized "code" user is rewritten to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodeLabel {
    /// `"Code"` (history listings)
    #[default]
    Capitalized,
    /// `"code"` (status `lastInteractionBy`)
    Lowercase,
}

impl CodeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Capitalized => "Code",
            Self::Lowercase => "code",
        }
    }
}

/// Map vendor arming states onto the camelCase vocabulary.
/// Unknown values pass through untouched.
pub fn armed_status(raw: &str) -> String {
    match raw.to_lowercase().as_str() {
        "partialarmed" => "partialArmed".into(),
        "armedannex" => "armedAnnex".into(),
        "disarmedannex" => "disarmedAnnex".into(),
        _ => raw.to_owned(),
    }
}

/// Replace a localized "code" placeholder with the canonical label.
pub fn code_user(raw: &str, label: CodeLabel) -> String {
    let token = raw.trim().to_lowercase();
    if CODE_TOKENS.contains(&token.as_str()) {
        label.as_str().to_owned()
    } else {
        raw.to_owned()
    }
}

/// `lock` -> `locked`, `unlock` -> `unlocked`.
pub fn lock_status(raw: &str) -> String {
    match raw {
        "lock" | "unlock" => format!("{raw}ed"),
        _ => raw.to_owned(),
    }
}

/// Render a vendor timestamp as `YYYY-MM-DD HH:mm:ss`.
///
/// ISO inputs keep their wall-clock time (any offset is dropped);
/// `/Date(<ms>)/` inputs are read as UTC.
pub fn timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();

    if let Some(millis) = raw
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        let digits_end = millis
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
            .map_or(millis.len(), |(i, _)| i);
        let millis: i64 = millis[..digits_end].parse().ok()?;
        let utc = DateTime::from_timestamp_millis(millis)?;
        return Some(utc.naive_utc().format(TIME_FORMAT).to_string());
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local().format(TIME_FORMAT).to_string());
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|local| local.format(TIME_FORMAT).to_string())
}
