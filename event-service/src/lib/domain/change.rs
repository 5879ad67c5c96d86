//! Append-only change records shared by users and events.
//!
//! Updates never overwrite a stored document. They append a [`ChangeRecord`]
//! holding only the fields the caller supplied; the base document is returned
//! unmodified on reads.

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::UserId;

/// New value of a changed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Text(value.to_rfc3339())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Fields supplied by one update request, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    fields: BTreeMap<String, FieldValue>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `field` if a value was supplied; absent values are skipped.
    pub fn set<V: Into<FieldValue>>(mut self, field: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.fields.insert(field.to_string(), value.into());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Stamp the change set with its author and time.
    pub fn into_record(self, updated_by: UserId, updated_at: DateTime<Utc>) -> ChangeRecord {
        ChangeRecord {
            fields: self.fields,
            updated_by,
            updated_at,
        }
    }
}

/// Audit entry appended on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub fields: BTreeMap<String, FieldValue>,
    pub updated_by: UserId,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_set_skips_absent_fields() {
        let changes = ChangeSet::new()
            .set("name", Some("Dinner".to_string()))
            .set::<i64>("max_guests_allowed", None)
            .set("is_host", Some(true));

        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes.get("name"),
            Some(&FieldValue::Text("Dinner".to_string()))
        );
        assert!(changes.get("max_guests_allowed").is_none());
    }

    #[test]
    fn test_empty_change_set() {
        let changes = ChangeSet::new().set::<String>("name", None);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_record_serialized_layout() {
        let user_id = UserId::new();
        let now = Utc::now();
        let record = ChangeSet::new()
            .set("max_guests_allowed", Some(8_i64))
            .set("cuisine", Some(vec!["Brazilian".to_string()]))
            .into_record(user_id, now);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fields"]["max_guests_allowed"], 8);
        assert_eq!(value["fields"]["cuisine"][0], "Brazilian");
        assert_eq!(value["updated_by"], user_id.to_string());

        let parsed: ChangeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.fields, record.fields);
    }
}
