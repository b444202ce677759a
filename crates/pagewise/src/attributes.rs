//! Ordered attribute mappings and records.
//!
//! [`Attributes`] is the one mapping type used for request parameters,
//! response bodies and record contents. Keys are unique and keep their
//! insertion order.
//!
//! [`Attributes::merge`] lets the argument win on conflicts.

use pagewise_seeker::FieldSource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered `field -> value` mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value for `key` as a string slice.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Inserts or replaces `key`. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns `true` if `key` holds a value other than `null` or `false`.
    pub fn is_set(&self, key: &str) -> bool {
        !matches!(self.0.get(key), None | Some(Value::Null) | Some(Value::Bool(false)))
    }

    /// Copies every entry of `other` over this mapping; `other` wins on
    /// conflicts.
    pub fn merge(&mut self, other: &Attributes) {
        for (key, value) in other.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// Iterates keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying JSON map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwraps into the underlying JSON map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Converts a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Attributes(map)),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Attributes(map)
    }
}

impl From<Attributes> for Value {
    fn from(attrs: Attributes) -> Self {
        Value::Object(attrs.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FieldSource for Attributes {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// One resource instance as returned by a fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Attributes);

impl Record {
    /// Wraps attributes as a record.
    pub fn new(attributes: Attributes) -> Self {
        Record(attributes)
    }

    /// The record's `id` field, unless absent or `null`.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id").filter(|v| !v.is_null())
    }

    /// Returns a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Borrows the attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.0
    }

    /// Unwraps into attributes.
    pub fn into_attributes(self) -> Attributes {
        self.0
    }

    /// Converts a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        Attributes::from_value(value).map(Record)
    }
}

impl From<Attributes> for Record {
    fn from(attrs: Attributes) -> Self {
        Record(attrs)
    }
}

impl FieldSource for Record {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_keeps_first_position() {
        let mut attrs = Attributes::from([("a", 1), ("b", 2)]);
        attrs.insert("a", 3);
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(attrs.get("a"), Some(&json!(3)));
    }

    #[test]
    fn merge_lets_argument_win() {
        let mut attrs = Attributes::from([("category_id", 1), ("position", 2)]);
        attrs.merge(&Attributes::from([("category_id", 9), ("locale", 5)]));
        assert_eq!(attrs.get("category_id"), Some(&json!(9)));
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, vec!["category_id", "position", "locale"]);
    }

    #[test]
    fn remove_preserves_order() {
        let mut attrs = Attributes::from([("a", 1), ("b", 2), ("c", 3)]);
        attrs.remove("a");
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn is_set_follows_truthiness() {
        let attrs = Attributes::new()
            .with("url", "http://x")
            .with("off", false)
            .with("none", Value::Null);
        assert!(attrs.is_set("url"));
        assert!(!attrs.is_set("off"));
        assert!(!attrs.is_set("none"));
        assert!(!attrs.is_set("missing"));
    }

    #[test]
    fn record_id_ignores_null() {
        assert_eq!(Record::from_value(json!({"id": 4})).unwrap().id(), Some(&json!(4)));
        assert_eq!(Record::from_value(json!({"id": null})).unwrap().id(), None);
        assert!(Record::from_value(json!([1])).is_none());
    }

    #[test]
    fn serializes_transparently() {
        let record = Record::new(Attributes::from([("id", 1)]));
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"id":1}"#);
    }
}
