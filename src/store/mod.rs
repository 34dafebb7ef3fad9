//! Item metadata persistence.
//!
//! Awakenings survive on items through a small key/value surface the host
//! maps onto its own item storage. [`MemoryStore`] backs tests and the demo
//! binary; a server embeds the trait over its real item containers.

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised while decoding awakening metadata from a store.
#[derive(Debug, Error, PartialEq)]
pub enum MetadataError {
    #[error("missing metadata key '{0}'")]
    MissingKey(&'static str),
    #[error("unknown modifier kind '{0}'")]
    UnknownKind(String),
    #[error("metadata key '{key}' holds an unusable value")]
    BadValue { key: &'static str },
}

/// Typed key/value access to one item's persistent metadata.
pub trait MetadataStore {
    fn get_str(&self, key: &str) -> Option<String>;
    fn set_str(&mut self, key: &str, value: &str);
    fn get_f64(&self, key: &str) -> Option<f64>;
    fn set_f64(&mut self, key: &str, value: f64);
    fn remove(&mut self, key: &str);
    fn contains(&self, key: &str) -> bool;

    /// Identifier used in log lines when a read fails
    fn item_id(&self) -> &str {
        "unknown"
    }
}

/// HashMap-backed store for tests and offline tooling.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    item_id: String,
    strings: HashMap<String, String>,
    floats: HashMap<String, f64>,
}

impl MemoryStore {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            strings: HashMap::new(),
            floats: HashMap::new(),
        }
    }

    pub fn key_count(&self) -> usize {
        self.strings.len() + self.floats.len()
    }
}

impl MetadataStore for MemoryStore {
    fn get_str(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn set_str(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.floats.get(key).copied()
    }

    fn set_f64(&mut self, key: &str, value: f64) {
        self.floats.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.strings.remove(key);
        self.floats.remove(key);
    }

    fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key) || self.floats.contains_key(key)
    }

    fn item_id(&self) -> &str {
        &self.item_id
    }
}
