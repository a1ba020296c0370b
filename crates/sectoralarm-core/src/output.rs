// ── Output formatter ──
//
// Every public `Site` read or action hands its record through `format`:
// a JSON string when `json_output` is set, the record itself otherwise.

use serde::Serialize;

use crate::error::CoreError;

/// A result as the caller asked to receive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatted<T> {
    Json(String),
    Structured(T),
}

impl<T> Formatted<T> {
    pub fn as_json(&self) -> Option<&str> {
        match self {
            Self::Json(json) => Some(json),
            Self::Structured(_) => None,
        }
    }

    pub fn into_structured(self) -> Option<T> {
        match self {
            Self::Json(_) => None,
            Self::Structured(value) => Some(value),
        }
    }
}

pub fn format<T: Serialize>(record: T, json_output: bool) -> Result<Formatted<T>, CoreError> {
    if json_output {
        let json = serde_json::to_string(&record).map_err(CoreError::parsing)?;
        Ok(Formatted::Json(json))
    } else {
        Ok(Formatted::Structured(record))
    }
}
