//! Flattened run record.

use serde_json::Value;

/// An ordered mapping of column name to cell value.
///
/// Values are always scalars: structured values are stored as their
/// compact JSON text. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    entries: Vec<(String, Value)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = match value.into() {
            v @ (Value::Array(_) | Value::Object(_)) => Value::String(v.to_string()),
            v => v,
        };
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut record = FlatRecord::new();
        record.insert("run_timestamp", "2025-01-01T00:00:00Z");
        record.insert("amazon_1_url", "https://a");
        record.insert("amazon_1_file", Value::Null);
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["run_timestamp", "amazon_1_url", "amazon_1_file"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = FlatRecord::new();
        record.insert("a", 1);
        record.insert("b", 2);
        record.insert("a", 3);
        assert_eq!(record.len(), 2);
        assert_eq!(record.keys().next(), Some("a"));
        assert_eq!(record.get("a"), Some(&json!(3)));
    }

    #[test]
    fn test_structured_values_become_json_text() {
        let mut record = FlatRecord::new();
        record.insert("tags", json!(["a", "b"]));
        record.insert("meta", json!({"k": 1}));
        assert_eq!(record.get("tags"), Some(&json!("[\"a\",\"b\"]")));
        assert_eq!(record.get("meta"), Some(&json!("{\"k\":1}")));
    }
}
