//! Defensive accessors over [`RawRecord`] values.
//!
//! The store guarantees nothing about field shape: a field may be missing,
//! `false` (Odoo's encoding for empty), a plain scalar, or an `[id, label]`
//! relation pair. Every caller goes through these helpers instead of
//! re-probing types at each call site.

use serde_json::Value;

use crate::odoo::RawRecord;

/// A relation field in one of the shapes the store delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationValue {
    Absent,
    Scalar(String),
    Relation { id: i64, label: Option<String> },
}

impl RelationValue {
    /// Decode whatever the store put in a relation slot.
    pub fn decode(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(_)) => RelationValue::Absent,
            Some(Value::Array(items)) => match items.first() {
                None => RelationValue::Absent,
                Some(first) => match first.as_i64() {
                    Some(id) => RelationValue::Relation {
                        id,
                        label: items.get(1).and_then(Value::as_str).map(str::to_string),
                    },
                    None => match first.as_str() {
                        Some(text) => RelationValue::Scalar(text.to_string()),
                        None => RelationValue::Absent,
                    },
                },
            },
            Some(Value::Number(n)) => match n.as_i64() {
                Some(id) => RelationValue::Relation { id, label: None },
                None => RelationValue::Scalar(n.to_string()),
            },
            Some(Value::String(s)) => RelationValue::Scalar(s.clone()),
            Some(_) => RelationValue::Absent,
        }
    }

    /// Label when present, else the stringified id, else the scalar text.
    pub fn display(&self) -> String {
        match self {
            RelationValue::Absent => String::new(),
            RelationValue::Scalar(text) => text.clone(),
            RelationValue::Relation { id, label } => {
                label.clone().unwrap_or_else(|| id.to_string())
            }
        }
    }

    /// Foreign id, when one was delivered.
    pub fn id(&self) -> Option<i64> {
        match self {
            RelationValue::Relation { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// Trimmed text value of a field; empty string for anything non-textual.
pub fn text_field(record: &RawRecord, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Numeric value of a field, defaulting when missing or mistyped.
pub fn number_field(record: &RawRecord, field: &str, default: f64) -> f64 {
    record
        .get(field)
        .and_then(Value::as_f64)
        .unwrap_or(default)
}

/// Try an ordered list of field aliases; first non-empty trimmed value wins.
pub fn first_alias_value(record: &RawRecord, aliases: &[&str]) -> String {
    aliases
        .iter()
        .map(|alias| text_field(record, alias))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}
