use crate::error::StoreError;
use crate::name_table::NameTable;
use std::collections::HashMap;
use tools::{Value, as_boolean, as_number, as_string, clamp};

/// Session-scoped storage kind.
pub const SESSION: i64 = 1;
/// Local (persistent) storage kind.
pub const LOCAL: i64 = 2;

/// The storage-kind selector table.
pub fn storage_kinds() -> NameTable {
    NameTable::from_validated(vec!["SESSION".to_string(), "LOCAL".to_string()])
}

/// String key/value storage with typed getters.
///
/// Values are always stored as strings; the typed getters coerce on the
/// way out and substitute the fallback for missing or malformed entries.
/// The backing map is owned by the manager; a host integration would
/// swap it for the real session-/local-scoped storage.
#[derive(Clone, Debug)]
pub struct StorageManager {
    kind: i64,
    values: HashMap<String, String>,
}

impl StorageManager {
    /// Creates a manager for the given kind; out-of-range kinds clamp into
    /// the selector table.
    pub fn new(kind: i64) -> Self {
        let kinds = storage_kinds();
        let kind = clamp(kind as f64, kinds.min() as f64, kinds.max() as f64) as i64;
        Self {
            kind,
            values: HashMap::new(),
        }
    }

    pub fn kind(&self) -> i64 {
        self.kind
    }

    pub fn kind_name(&self) -> String {
        storage_kinds().translate(self.kind).to_string()
    }

    /// Stores a value under a key; both are coerced to strings. An empty
    /// coerced key is refused.
    pub fn set(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<(), StoreError> {
        let key = as_string(&key.into(), "");
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        self.values.insert(key, as_string(&value.into(), ""));
        Ok(())
    }

    pub fn remove(&mut self, key: impl Into<Value>) -> Result<(), StoreError> {
        let key = as_string(&key.into(), "");
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        self.values.remove(&key);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_string(&self, key: &str, fallback: &str) -> String {
        match self.values.get(key) {
            Some(value) => value.clone(),
            None => fallback.to_string(),
        }
    }

    pub fn get_number(&self, key: &str, fallback: f64) -> f64 {
        match self.values.get(key) {
            Some(value) => as_number(&Value::Str(value.clone()), fallback),
            None => fallback,
        }
    }

    pub fn get_boolean(&self, key: &str, fallback: bool) -> bool {
        match self.values.get(key) {
            Some(value) => as_boolean(&Value::Str(value.clone()), fallback),
            None => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_clamp_into_the_selector_table() {
        assert_eq!(StorageManager::new(SESSION).kind_name(), "SESSION");
        assert_eq!(StorageManager::new(LOCAL).kind_name(), "LOCAL");
        assert_eq!(StorageManager::new(-3).kind_name(), "SESSION");
        assert_eq!(StorageManager::new(99).kind_name(), "LOCAL");
    }

    #[test]
    fn values_store_as_strings_and_coerce_back_out() {
        let mut storage = StorageManager::new(SESSION);
        storage.set("count", 42).unwrap();
        storage.set("flag", true).unwrap();
        storage.set("label", "ready").unwrap();

        assert_eq!(storage.get_string("count", ""), "42");
        assert_eq!(storage.get_number("count", 0.0), 42.0);
        assert!(storage.get_boolean("flag", false));
        assert_eq!(storage.get_string("label", "x"), "ready");

        // Missing or malformed entries fall back.
        assert_eq!(storage.get_number("label", 7.0), 7.0);
        assert_eq!(storage.get_number("missing", 7.0), 7.0);
        assert!(storage.get_boolean("missing", true));
    }

    #[test]
    fn empty_keys_are_refused() {
        let mut storage = StorageManager::new(SESSION);
        assert_eq!(storage.set("", "x"), Err(StoreError::EmptyKey));
        assert_eq!(storage.set(Value::Null, "x"), Err(StoreError::EmptyKey));
        assert_eq!(storage.remove(""), Err(StoreError::EmptyKey));
    }

    #[test]
    fn remove_and_clear_drop_entries() {
        let mut storage = StorageManager::new(LOCAL);
        storage.set("a", 1).unwrap();
        storage.set("b", 2).unwrap();
        storage.remove("a").unwrap();
        assert_eq!(storage.get_string("a", "gone"), "gone");
        assert_eq!(storage.len(), 1);
        storage.clear();
        assert!(storage.is_empty());
    }
}
