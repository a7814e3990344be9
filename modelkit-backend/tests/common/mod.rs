//! Shared doubles for collaborator contract tests.

#![allow(dead_code)]

use modelkit_backend::{Codec, CodecError, CodecResult, Store, StoreError, StoreRecord, StoreResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory store keeping records in key order.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, StoreRecord>>,
}

impl Store for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn read(&self, key: &str) -> StoreResult<StoreRecord> {
        self.records
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn write(&self, record: StoreRecord) -> StoreResult<()> {
        self.records.lock().unwrap().insert(record.key.clone(), record);
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.records
            .lock()
            .unwrap()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Store whose reads always fail with a backend error.
pub struct BrokenStore;

impl Store for BrokenStore {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn read(&self, _key: &str) -> StoreResult<StoreRecord> {
        Err(StoreError::Unavailable("disk on fire".into()))
    }

    fn write(&self, _record: StoreRecord) -> StoreResult<()> {
        Err(StoreError::Unavailable("disk on fire".into()))
    }

    fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("disk on fire".into()))
    }

    fn list(&self, _prefix: &str) -> StoreResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// JSON text codec.
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn marshal(&self, value: &Value) -> CodecResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn unmarshal(&self, data: &[u8]) -> CodecResult<Value> {
        serde_json::from_slice(data).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
