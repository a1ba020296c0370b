// Rule tables: the only place that knows vendor field names.

use serde_json::Value;

use super::normalize::{self, CodeLabel};
use super::{FieldRule, Identified, MapOptions, Mapped, project};
use crate::model::{
    ActionResult, HistoryEvent, Info, Lock, LockActionResult, Status, TemperatureSensor,
};

static NULL: Value = Value::Null;

const fn rule(name: &'static str, extract: fn(&Value, &MapOptions) -> Value) -> FieldRule {
    FieldRule { name, extract }
}

// ── Extraction helpers ───────────────────────────────────────────────

fn at<'a>(doc: &'a Value, pointer: &str) -> &'a Value {
    doc.pointer(pointer).unwrap_or(&NULL)
}

/// Strings as-is, numbers stringified, anything else null.
fn text(value: &Value) -> Value {
    match value {
        Value::String(_) => value.clone(),
        Value::Number(n) => Value::String(n.to_string()),
        _ => Value::Null,
    }
}

fn flag(value: &Value) -> Value {
    Value::Bool(value.as_bool().unwrap_or(false))
}

/// Numbers as-is, numeric strings parsed, anything else null.
fn number(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::String(s) => s.trim().parse::<u64>().map_or(Value::Null, Value::from),
        _ => Value::Null,
    }
}

/// True only for a present, non-empty array.
fn has_items(value: &Value) -> Value {
    Value::Bool(value.as_array().is_some_and(|items| !items.is_empty()))
}

fn map_str(value: &Value, f: impl Fn(&str) -> String) -> Value {
    value.as_str().map_or(Value::Null, |s| Value::String(f(s)))
}

fn armed(value: &Value) -> Value {
    map_str(value, normalize::armed_status)
}

/// Known timestamp forms are rendered uniformly; other text passes through.
fn time(value: &Value) -> Value {
    map_str(value, |raw| {
        normalize::timestamp(raw).unwrap_or_else(|| raw.to_owned())
    })
}

fn user(value: &Value, label: CodeLabel) -> Value {
    map_str(value, |u| normalize::code_user(u, label))
}

/// `status` on panel actions, `Status` on lock actions; either will do.
fn outcome(doc: &Value) -> Value {
    text(doc.get("status").or_else(|| doc.get("Status")).unwrap_or(&NULL))
}

// ── Overview ─────────────────────────────────────────────────────────

impl Mapped for Info {
    const RULES: &'static [FieldRule] = &[
        rule("siteId", |d, _| text(at(d, "/Panel/PanelId"))),
        rule("name", |d, _| text(at(d, "/Panel/PanelDisplayName"))),
        rule("partialArmingAvailable", |d, _| flag(at(d, "/Panel/PartialAvalible"))),
        rule("annexArmingAvailable", |d, _| flag(at(d, "/Panel/AnnexAvalible"))),
        rule("locksAvailable", |d, _| has_items(at(d, "/Locks"))),
        rule("temperaturesAvailable", |d, _| has_items(at(d, "/Temperatures"))),
        rule("camerasAvailable", |d, _| has_items(at(d, "/Videos"))),
        rule("smartPlugsAvailable", |d, _| has_items(at(d, "/Smartplugs"))),
    ];
}

impl Mapped for Status {
    const RULES: &'static [FieldRule] = &[
        rule("siteId", |d, _| text(at(d, "/Panel/PanelId"))),
        rule("name", |d, _| text(at(d, "/Panel/PanelDisplayName"))),
        rule("armedStatus", |d, _| armed(at(d, "/Panel/ArmedStatus"))),
        rule("annexArmedStatus", |d, _| armed(at(d, "/Panel/StatusAnnex"))),
        rule("partialArmingAvailable", |d, _| flag(at(d, "/Panel/PartialAvalible"))),
        rule("annexArmingAvailable", |d, _| flag(at(d, "/Panel/AnnexAvalible"))),
        rule("locksAvailable", |d, _| has_items(at(d, "/Locks"))),
        rule("locks", |d, opts| {
            let locks = at(d, "/Locks").as_array().map(Vec::as_slice).unwrap_or_default();
            Value::Array(locks.iter().map(|l| project(Lock::RULES, l, opts)).collect())
        }),
    ];
}

// ── History ──────────────────────────────────────────────────────────

impl Mapped for HistoryEvent {
    const RULES: &'static [FieldRule] = &[
        rule("time", |e, _| time(at(e, "/Time"))),
        rule("action", |e, _| armed(at(e, "/EventType"))),
        rule("user", |e, opts| user(at(e, "/User"), opts.code_label)),
    ];
}

// ── Actions ──────────────────────────────────────────────────────────

impl Mapped for ActionResult {
    const RULES: &'static [FieldRule] = &[
        rule("status", |d, _| outcome(d)),
        rule("name", |d, _| text(at(d, "/panelData/PanelDisplayName"))),
        rule("armedStatus", |d, _| armed(at(d, "/panelData/ArmedStatus"))),
        rule("annexArmedStatus", |d, _| armed(at(d, "/panelData/StatusAnnex"))),
    ];
}

impl Mapped for LockActionResult {
    const RULES: &'static [FieldRule] = &[rule("status", |d, _| outcome(d))];
}

// ── Locks & sensors ──────────────────────────────────────────────────

impl Mapped for Lock {
    const RULES: &'static [FieldRule] = &[
        rule("lockId", |l, _| text(at(l, "/Serial"))),
        rule("name", |l, _| text(at(l, "/Label"))),
        rule("status", |l, _| map_str(at(l, "/Status"), normalize::lock_status)),
        rule("soundLevel", |l, _| number(at(l, "/SoundLevel"))),
        rule("autoLockEnabled", |l, _| flag(at(l, "/AutoLockEnabled"))),
    ];
}

impl Identified for Lock {
    fn identifier(&self) -> &str {
        &self.lock_id
    }
}

impl Mapped for TemperatureSensor {
    const RULES: &'static [FieldRule] = &[
        rule("sensorId", |s, _| text(at(s, "/SerialNo"))),
        rule("name", |s, _| text(at(s, "/Label"))),
        rule("temperature", |s, _| text(at(s, "/Temprature"))),
    ];
}

impl Identified for TemperatureSensor {
    fn identifier(&self) -> &str {
        &self.sensor_id
    }
}
