//! Read access to localizable records.
//!
//! Storefront entities (store settings, themes, categories, products) reach
//! this crate as flat key/value maps. [`FieldSource`] abstracts over the map
//! types they arrive in so resolution never has to care whether a record came
//! from a REST payload (`serde_json::Map`) or was built in code.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::hash::BuildHasher;

use serde_json::{
    Map,
    Value,
};

/// Partial update produced by batch operations, keyed by concrete record key.
///
/// A `BTreeMap` keeps the serialized PATCH body stable.
pub type UpdatePayload = BTreeMap<String, String>;

/// A record whose text fields can be looked up by concrete key.
pub trait FieldSource {
    /// Returns the string stored under `key`, if any.
    fn field(&self, key: &str) -> Option<&str>;

    /// Like [`FieldSource::field`], but an empty string counts as absent.
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.field(key).filter(|value| !value.is_empty())
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field(&self, key: &str) -> Option<&str> {
        (**self).field(key)
    }
}

impl<S: BuildHasher> FieldSource for HashMap<String, String, S> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: BuildHasher> FieldSource for HashMap<String, Option<String>, S> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Option::as_deref)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, Option<String>> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Option::as_deref)
    }
}

/// Non-string values (numbers, `null`, nested objects) read as absent.
impl FieldSource for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// Only JSON objects carry fields; any other value reads as an empty record.
impl FieldSource for Value {
    fn field(&self, key: &str) -> Option<&str> {
        self.as_object().and_then(|object| object.field(key))
    }
}

/// Merges `updates` into a JSON record, overwriting existing keys.
pub fn apply_updates(record: &mut Map<String, Value>, updates: &UpdatePayload) {
    for (key, value) in updates {
        record.insert(key.clone(), Value::String(value.clone()));
    }
}
