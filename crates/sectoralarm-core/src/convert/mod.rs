// ── Field mapper ──
//
// Turns raw vendor bodies into the normalized records in `crate::model`.
// Each record type owns a table of (output field, extraction rule) pairs;
// the engine runs the table against the parsed document into a plain JSON
// object and lets serde check it against the record type. Vendor field
// names appear nowhere else in the workspace.
//
// Every body passes the same gate first: version sentinel, then JSON
// parsing, then (for actions) the success flag.

mod normalize;
mod rules;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use sectoralarm_api::RawResponse;

use crate::error::CoreError;
use crate::model::{
    ActionResult, HistoryEvent, Info, Lock, LockActionResult, Status, TemperatureSensor,
};

pub use normalize::CodeLabel;

/// Body the vendor sends instead of JSON when the version tag is stale.
const INVALID_VERSION_SENTINEL: &str = "Invalid version";

/// Knobs for list mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapOptions {
    /// Keep at most this many elements, in original order.
    pub top: Option<usize>,
    /// Keep only the element whose mapped identifier equals this.
    pub id: Option<String>,
    pub code_label: CodeLabel,
}

impl MapOptions {
    #[must_use]
    pub fn top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn code_label(mut self, label: CodeLabel) -> Self {
        self.code_label = label;
        self
    }
}

// ── Rule engine ──────────────────────────────────────────────────────

/// One output field and how to compute it from the vendor document.
pub(crate) struct FieldRule {
    pub name: &'static str,
    pub extract: fn(&Value, &MapOptions) -> Value,
}

/// A record type produced by running a rule table.
pub(crate) trait Mapped: DeserializeOwned {
    const RULES: &'static [FieldRule];
}

/// A record that list filters can match on.
pub(crate) trait Identified {
    fn identifier(&self) -> &str;
}

/// Run a rule table into an untyped object (used for nested records too).
pub(crate) fn project(rules: &[FieldRule], input: &Value, opts: &MapOptions) -> Value {
    let fields: Map<String, Value> = rules
        .iter()
        .map(|rule| (rule.name.to_owned(), (rule.extract)(input, opts)))
        .collect();
    Value::Object(fields)
}

fn apply<T: Mapped>(input: &Value, opts: &MapOptions) -> Result<T, CoreError> {
    serde_json::from_value(project(T::RULES, input, opts)).map_err(CoreError::parsing)
}

fn apply_each<T: Mapped>(items: &[Value], opts: &MapOptions) -> Result<Vec<T>, CoreError> {
    let limit = opts.top.unwrap_or(items.len());
    items
        .iter()
        .take(limit)
        .map(|item| apply::<T>(item, opts))
        .collect()
}

fn filter_by_id<T: Identified>(records: Vec<T>, opts: &MapOptions) -> Vec<T> {
    match opts.id.as_deref() {
        Some(id) => records
            .into_iter()
            .filter(|record| record.identifier() == id)
            .take(1)
            .collect(),
        None => records,
    }
}

// ── Body gate ────────────────────────────────────────────────────────

fn parse(raw: &RawResponse) -> Result<Value, CoreError> {
    let body = raw.as_str().trim();
    if body == INVALID_VERSION_SENTINEL
        || body.trim_matches('"') == INVALID_VERSION_SENTINEL
    {
        return Err(CoreError::InvalidVersion);
    }
    serde_json::from_str(body).map_err(CoreError::parsing)
}

/// Action endpoints report refusal in the body of a 2xx response.
fn ensure_success(doc: &Value) -> Result<(), CoreError> {
    let status = doc
        .get("status")
        .or_else(|| doc.get("Status"))
        .and_then(Value::as_str);
    match status {
        Some("success") => Ok(()),
        other => Err(CoreError::InvalidCode {
            status: other.unwrap_or("missing").to_owned(),
        }),
    }
}

fn as_list<'a>(doc: &'a Value, what: &str) -> Result<&'a [Value], CoreError> {
    doc.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CoreError::unexpected_shape(format!("{what}: expected a JSON array")))
}

// ── Public mappings ──────────────────────────────────────────────────

/// Site capabilities from the overview body.
pub fn map_info(raw: &RawResponse) -> Result<Info, CoreError> {
    apply(&parse(raw)?, &MapOptions::default())
}

/// Arming state from the overview body, with the overview's lock summary.
pub fn map_status(raw: &RawResponse) -> Result<Status, CoreError> {
    apply(&parse(raw)?, &MapOptions::default())
}

/// Panel event log. `opts.top` truncates, `opts.code_label` picks the
/// literal for localized "code" users.
pub fn map_history(raw: &RawResponse, opts: &MapOptions) -> Result<Vec<HistoryEvent>, CoreError> {
    let doc = parse(raw)?;
    let events = doc
        .get("LogDetails")
        .ok_or_else(|| CoreError::unexpected_shape("history: missing event list"))?;
    apply_each(as_list(events, "history")?, opts)
}

pub fn map_temperatures(
    raw: &RawResponse,
    opts: &MapOptions,
) -> Result<Vec<TemperatureSensor>, CoreError> {
    let doc = parse(raw)?;
    let sensors = apply_each(as_list(&doc, "temperatures")?, opts)?;
    Ok(filter_by_id(sensors, opts))
}

pub fn map_locks(raw: &RawResponse, opts: &MapOptions) -> Result<Vec<Lock>, CoreError> {
    let doc = parse(raw)?;
    let locks = apply_each(as_list(&doc, "locks")?, opts)?;
    Ok(filter_by_id(locks, opts))
}

/// Result of an arm/disarm command; refusal is `InvalidCode`.
pub fn map_action(raw: &RawResponse) -> Result<ActionResult, CoreError> {
    let doc = parse(raw)?;
    ensure_success(&doc)?;
    apply(&doc, &MapOptions::default())
}

/// Result of a lock/unlock command; refusal is `InvalidCode`.
pub fn map_lock_action(raw: &RawResponse) -> Result<LockActionResult, CoreError> {
    let doc = parse(raw)?;
    ensure_success(&doc)?;
    apply(&doc, &MapOptions::default())
}
