use std::fmt;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::alias::resolve_field;
use crate::error::{Error, Result};

/// Value stored under a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    /// Always rounded to two decimals by the producer.
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            FieldValue::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            FieldValue::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Interpret the value as a calendar date; text must be ISO-8601 (`YYYY-MM-DD`).
    pub fn to_date(&self, field: &str) -> Result<NaiveDate> {
        match self {
            FieldValue::Date(value) => Ok(*value),
            FieldValue::Text(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|err| Error::InvalidValue {
                    field: field.to_string(),
                    message: err.to_string(),
                }),
            other => Err(Error::InvalidValue {
                field: field.to_string(),
                message: format!("expected a date, found {other}"),
            }),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value:.2}"),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Int(value) => serializer.serialize_i64(*value),
            FieldValue::Float(value) => serializer.serialize_f64((value * 100.0).round() / 100.0),
            FieldValue::Text(value) => serializer.serialize_str(value),
            FieldValue::Date(value) => {
                serializer.serialize_str(&value.format("%Y-%m-%d").to_string())
            }
        }
    }
}

/// Ordered mapping from field label to value.
///
/// Labels keep the casing they were requested with and are unique within a
/// record. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|(label, value)| (label.as_str(), value))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(label, _)| label.as_str())
    }

    /// Exact-label lookup.
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }

    /// Existing label matching `label` case-insensitively.
    pub fn find_label(&self, label: &str) -> Option<&str> {
        let wanted = label.trim();
        self.fields
            .iter()
            .find(|(existing, _)| existing.trim().eq_ignore_ascii_case(wanted))
            .map(|(existing, _)| existing.as_str())
    }

    /// First field whose label resolves to the canonical key `key`.
    pub fn find_by_key(&self, key: &str) -> Option<(&str, &FieldValue)> {
        self.fields
            .iter()
            .find(|(existing, _)| resolve_field(existing) == key)
            .map(|(label, value)| (label.as_str(), value))
    }

    /// Insert or overwrite by exact label. New labels are appended.
    pub fn insert(&mut self, label: impl Into<String>, value: FieldValue) {
        let label = label.into();
        if let Some(slot) = self.fields.iter_mut().find(|(existing, _)| *existing == label) {
            slot.1 = value;
        } else {
            self.fields.push((label, value));
        }
    }

    /// Remove a field whose label matches case-insensitively.
    pub fn remove(&mut self, label: &str) -> Option<FieldValue> {
        let wanted = label.trim();
        let index = self
            .fields
            .iter()
            .position(|(existing, _)| existing.trim().eq_ignore_ascii_case(wanted))?;
        Some(self.fields.remove(index).1)
    }

    /// Remove the first field whose label resolves to `key`.
    pub fn remove_by_key(&mut self, key: &str) -> Option<(String, FieldValue)> {
        let index = self
            .fields
            .iter()
            .position(|(existing, _)| resolve_field(existing) == key)?;
        Some(self.fields.remove(index))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (label, value) in iter {
            record.insert(label, value);
        }
        record
    }
}
