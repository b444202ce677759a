//! Keyed record storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use pagewise::Attributes;
use pagewise_seeker::natural_string;
use serde_json::{Map, Value};

use crate::error::MockError;

#[derive(Debug, Default)]
struct Tables {
    tables: HashMap<String, Map<String, Value>>,
    next_id: u64,
}

impl Tables {
    fn assign_id(&mut self, record: &mut Attributes) -> String {
        match record.get("id") {
            Some(Value::Number(n)) => {
                if let Some(n) = n.as_u64() {
                    self.next_id = self.next_id.max(n);
                }
            }
            Some(Value::String(s)) => {
                if let Ok(n) = s.trim().parse::<u64>() {
                    self.next_id = self.next_id.max(n);
                }
            }
            _ => {
                self.next_id += 1;
                record.insert("id", self.next_id);
            }
        }
        key_of(record.get("id"))
    }
}

/// Records of every collection, each kept in insertion order.
///
/// Records without an `id` get the next number of a counter shared by all
/// collections. Lookups compare ids by their string form, so `7` and `"7"`
/// address the same record.
#[derive(Debug, Default)]
pub struct MockStore {
    inner: RwLock<Tables>,
}

impl MockStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a fixture of the form `{"<collection>": [records...]}`.
    ///
    /// Returns the number of records loaded.
    pub fn load(&self, fixture: Value) -> Result<usize, MockError> {
        let Value::Object(collections) = fixture else {
            return Err(MockError::Fixture("expected an object of collections".into()));
        };

        let mut loaded = 0;
        for (key, records) in collections {
            let Value::Array(records) = records else {
                return Err(MockError::Fixture(format!("'{key}' is not a list")));
            };
            for record in records {
                let record = Attributes::from_value(record)
                    .ok_or_else(|| MockError::Fixture(format!("non-object record in '{key}'")))?;
                self.insert(&key, record);
                loaded += 1;
            }
        }
        tracing::debug!(records = loaded, "fixture loaded");
        Ok(loaded)
    }

    /// Parses and loads a JSON fixture, see [`load`](Self::load).
    pub fn load_str(&self, json: &str) -> Result<usize, MockError> {
        self.load(serde_json::from_str(json)?)
    }

    /// Stores a record, assigning an id when it has none.
    ///
    /// An existing record with the same id is replaced in place.
    pub fn insert(&self, collection: &str, mut record: Attributes) -> Attributes {
        let mut tables = self.write();
        let key = tables.assign_id(&mut record);
        tables
            .tables
            .entry(collection.to_string())
            .or_default()
            .insert(key, record.clone().into());
        record
    }

    /// Returns the record with `id`.
    pub fn get(&self, collection: &str, id: &Value) -> Option<Attributes> {
        let key = key_of(Some(id));
        self.read()
            .tables
            .get(collection)
            .and_then(|table| table.get(&key))
            .cloned()
            .and_then(Attributes::from_value)
    }

    /// Merges `changes` into the record with `id`, returning the result.
    pub fn update(&self, collection: &str, id: &Value, changes: &Attributes) -> Option<Attributes> {
        let key = key_of(Some(id));
        let mut tables = self.write();
        let slot = tables.tables.get_mut(collection)?.get_mut(&key)?;

        let mut record = Attributes::from_value(slot.take()).unwrap_or_default();
        let stored_id = record.get("id").cloned().unwrap_or_else(|| id.clone());
        record.merge(changes);
        record.insert("id", stored_id);
        *slot = record.clone().into();
        Some(record)
    }

    /// Removes the record with `id`.
    pub fn remove(&self, collection: &str, id: &Value) -> Option<Attributes> {
        let key = key_of(Some(id));
        self.write()
            .tables
            .get_mut(collection)?
            .shift_remove(&key)
            .and_then(Attributes::from_value)
    }

    /// Every record of `collection`, in insertion order.
    pub fn values(&self, collection: &str) -> Vec<Attributes> {
        self.read()
            .tables
            .get(collection)
            .map(|table| table.values().cloned().filter_map(Attributes::from_value).collect())
            .unwrap_or_default()
    }

    /// Number of records in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.read().tables.get(collection).map_or(0, Map::len)
    }

    /// Returns `true` if `collection` holds no records.
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn key_of(id: Option<&Value>) -> String {
    natural_string(id).map(|s| s.into_owned()).unwrap_or_default()
}
