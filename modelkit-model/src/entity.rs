use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ModelResult;

/// A uniquely identified record with an opaque payload.
pub trait Entity: Send + Sync {
    /// Id of the entity, unique within a model's namespace.
    fn id(&self) -> &str;

    /// Associated value.
    fn value(&self) -> &Value;

    /// Registered type name, if the entity is typed.
    fn entity_type(&self) -> Option<&str> {
        None
    }
}

/// The entity type models hand out and read into.
///
/// `value` holds arbitrary JSON; typed data goes in and out through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    pub value: Value,
}

impl Record {
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            entity_type: None,
            value,
        }
    }

    /// Creates a record with a fresh time-ordered id (UUID v7).
    pub fn generate(value: Value) -> Self {
        Self::new(Uuid::now_v7().to_string(), value)
    }

    /// Creates an empty record to be filled by `Model::read`.
    pub fn for_id(id: impl Into<String>) -> Self {
        Self::new(id, Value::Null)
    }

    /// Builds a record from any serializable value.
    pub fn from_serialize<T: Serialize>(id: impl Into<String>, value: &T) -> ModelResult<Self> {
        Ok(Self::new(id, serde_json::to_value(value)?))
    }

    #[must_use]
    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Deserialize the payload into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> ModelResult<T> {
        Ok(T::deserialize(&self.value)?)
    }

    /// Extract a string value from `value` using a JSON pointer (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.value.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `value` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.value.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `value` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.value.pointer(pointer).and_then(|v| v.as_f64())
    }
}

impl Entity for Record {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> &Value {
        &self.value
    }

    fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }
}
