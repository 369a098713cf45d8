//! Field values and the collected-data map.
//!
//! Values are typed by the owning field's kind, so the persistence codec
//! can match exhaustively on serialize and deserialize instead of sniffing
//! date-shaped strings on read. The persisted JSON stays plain (string,
//! string array, or RFC 3339 date string per field id).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use super::definition::{FieldKind, FlowDefinition};

/// A single collected answer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text, or the chosen option of a radio/select field.
    Text(String),
    /// A picked calendar date.
    Date(DateTime<Utc>),
    /// Selected option values of a checkbox field. Single-select checkboxes
    /// hold zero or one entries.
    Selections(Vec<String>),
}

impl FieldValue {
    /// Whether this value satisfies a required field. Scalars always do;
    /// selection lists must be non-empty.
    pub fn satisfies_required(&self) -> bool {
        match self {
            Self::Selections(values) => !values.is_empty(),
            _ => true,
        }
    }

    /// Whether the value's shape matches the given field kind.
    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (
                Self::Text(_),
                FieldKind::Text | FieldKind::Radio | FieldKind::Select
            ) | (Self::Date(_), FieldKind::Date)
                | (Self::Selections(_), FieldKind::Checkbox)
        )
    }
}

/// Answers collected so far, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedData {
    values: HashMap<String, FieldValue>,
}

impl CollectedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// Unconditional merge; the previous value, if any, is replaced.
    pub fn insert(&mut self, field_id: impl Into<String>, value: FieldValue) {
        self.values.insert(field_id.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    /// Serialize to the persisted JSON shape: field id → string, string
    /// array, or RFC 3339 date string.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (id, value) in &self.values {
            let json = match value {
                FieldValue::Text(s) => Value::String(s.clone()),
                FieldValue::Date(dt) => Value::String(dt.to_rfc3339()),
                FieldValue::Selections(items) => {
                    Value::Array(items.iter().cloned().map(Value::String).collect())
                }
            };
            map.insert(id.clone(), json);
        }
        Value::Object(map)
    }

    /// Rebuild from persisted JSON. Each entry is retyped from its field's
    /// kind in `definition`; entries for unknown fields or with mismatched
    /// shapes are dropped. Returns `None` if `json` is not an object.
    pub fn from_json(definition: &FlowDefinition, json: &Value) -> Option<Self> {
        let object = json.as_object()?;
        let mut data = Self::new();
        for (id, raw) in object {
            let Some(field) = definition.field(id) else {
                debug!(flow = %definition.flow, field = %id, "Dropping entry for unknown field");
                continue;
            };
            match decode_value(field.kind, raw) {
                Some(value) => data.insert(id.clone(), value),
                None => {
                    warn!(flow = %definition.flow, field = %id, "Dropping entry with mismatched shape");
                }
            }
        }
        Some(data)
    }
}

/// Decode one persisted entry according to its field kind.
fn decode_value(kind: FieldKind, raw: &Value) -> Option<FieldValue> {
    match kind {
        FieldKind::Text | FieldKind::Radio | FieldKind::Select => {
            raw.as_str().map(|s| FieldValue::Text(s.to_string()))
        }
        FieldKind::Date => {
            let s = raw.as_str()?;
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| FieldValue::Date(dt.with_timezone(&Utc)))
        }
        FieldKind::Checkbox => {
            let items = raw.as_array()?;
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(item.as_str()?.to_string());
            }
            Some(FieldValue::Selections(values))
        }
    }
}
