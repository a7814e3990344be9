//! Key-value store contract.

use crate::error::StoreResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// An opaque record as the store sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub key: String,
    /// Encoded payload. The store never inspects it.
    pub value: Vec<u8>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    /// Time to live from the moment of the write. `None` never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<Duration>,
}

impl StoreRecord {
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
            metadata: BTreeMap::new(),
            expiry: None,
        }
    }

    /// Adds one metadata entry, replacing an existing value for the key.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Looks up a metadata entry.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Abstract key-value store.
///
/// Implementations own persistence and expiry. Callers see only keys and
/// opaque byte payloads.
pub trait Store: Send + Sync {
    /// Returns the name of the store implementation (e.g. "memory").
    fn name(&self) -> &'static str;

    /// Reads the record under `key`.
    /// Fails with `StoreError::NotFound` when nothing is stored there.
    fn read(&self, key: &str) -> StoreResult<StoreRecord>;

    /// Writes a record, replacing whatever was stored under its key.
    fn write(&self, record: StoreRecord) -> StoreResult<()>;

    /// Deletes the record under `key`.
    /// Fails with `StoreError::NotFound` when nothing is stored there.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Lists keys starting with `prefix`, in ascending order.
    fn list(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Whether a record exists under `key`.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        match self.read(key) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
