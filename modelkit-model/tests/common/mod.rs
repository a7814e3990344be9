//! Shared doubles and helpers for model tests.

#![allow(dead_code)]

use modelkit_backend::{Codec, CodecError, CodecResult, Store, StoreError, StoreRecord, StoreResult};
use modelkit_model::{with_codec, with_store, Crud};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Installs a test-writer subscriber once. `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory store keeping records in key order.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, StoreRecord>>,
}

impl MemoryStore {
    /// Raw access for assertions on what the model wrote.
    pub fn raw(&self, key: &str) -> Option<StoreRecord> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
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

/// Store that fails every call.
pub struct BrokenStore;

impl Store for BrokenStore {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn read(&self, _key: &str) -> StoreResult<StoreRecord> {
        Err(StoreError::Unavailable("offline".into()))
    }

    fn write(&self, _record: StoreRecord) -> StoreResult<()> {
        Err(StoreError::Unavailable("offline".into()))
    }

    fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("offline".into()))
    }

    fn list(&self, _prefix: &str) -> StoreResult<Vec<String>> {
        Err(StoreError::Unavailable("offline".into()))
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

/// Codec that encodes fine but can never decode.
pub struct WriteOnlyCodec;

impl Codec for WriteOnlyCodec {
    fn name(&self) -> &'static str {
        "write-only"
    }

    fn marshal(&self, value: &Value) -> CodecResult<Vec<u8>> {
        JsonCodec.marshal(value)
    }

    fn unmarshal(&self, _data: &[u8]) -> CodecResult<Value> {
        Err(CodecError::Decode("write-only codec".into()))
    }
}

/// A configured model plus a handle on its store.
pub fn memory_model() -> (Crud, Arc<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::default());
    let model = Crud::with_options(vec![with_store(store.clone()), with_codec(Arc::new(JsonCodec))])
        .unwrap();
    (model, store)
}
