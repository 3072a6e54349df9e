//! Single Transaction Record

use crate::{TableError, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to value mapping, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, returning the previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Look up a field, failing when absent
    pub fn get(&self, field: &str) -> Result<&Value, TableError> {
        self.fields
            .get(field)
            .ok_or_else(|| TableError::MissingField(field.to_string()))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a record from a JSON object
    pub fn from_json(json: &serde_json::Value) -> Result<Self, TableError> {
        let object = json
            .as_object()
            .ok_or_else(|| TableError::InvalidJson("record must be a JSON object".to_string()))?;

        let mut record = Record::new();
        for (field, value) in object {
            record.insert(field.clone(), Value::try_from(value.clone())?);
        }
        Ok(record)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_field_error() {
        let record = Record::new().with("income", 100);
        assert!(record.get("income").is_ok());
        assert_eq!(
            record.get("debt"),
            Err(TableError::MissingField("debt".to_string()))
        );
    }

    #[test]
    fn test_from_json_object() {
        let record = Record::from_json(&json!({"income": 5000, "debt": 1200.5, "tag": null})).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("debt").unwrap(), &Value::Float(1200.5));
        assert!(record.get("tag").unwrap().is_missing());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Record::from_json(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let record = Record::new().with("a", 1).with("b", "x");
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"a": 1, "b": "x"}));
    }
}
