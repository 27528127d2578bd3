//! Store Facade
//!
//! Wraps the in-memory key-value map with the three protocol operations,
//! each producing the human-readable outcome line that becomes the wire
//! response.
//!
//! A single coarse mutex guards the map, so every operation is atomic with
//! respect to concurrent connection handlers.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::protocol::{Request, Response};

/// In-memory key-value store, `String` keys to signed integer values
#[derive(Debug, Default)]
pub struct Store {
    entries: Mutex<HashMap<String, i64>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key-value pair
    pub fn put(&self, key: &str, value: i64) -> String {
        self.entries.lock().insert(key.to_string(), value);
        format!("stored {} = {}", key, value)
    }

    /// Look up a key, reporting the value or its absence
    pub fn get(&self, key: &str) -> String {
        match self.entries.lock().get(key) {
            Some(value) => format!("{} = {}", key, value),
            None => format!("{} is not present", key),
        }
    }

    /// Remove a key; removing an absent key still confirms
    pub fn delete(&self, key: &str) -> String {
        self.entries.lock().remove(key);
        format!("deleted {}", key)
    }

    /// Apply a parsed request and produce its response
    pub fn apply(&self, request: &Request) -> Response {
        let message = match request {
            Request::Put { key, value } => self.put(key, *value),
            Request::Get { key } => self.get(key),
            Request::Delete { key } => self.delete(key),
        };
        Response::ok(message)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
