use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{ModelError, ModelResult};

/// Describes a registered entity type's payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub entity_type: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl EntitySchema {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Checks the schema itself: a type name, pointer-shaped paths, no duplicates.
    pub fn validate(&self) -> ModelResult<()> {
        if self.entity_type.trim().is_empty() {
            return Err(ModelError::InvalidSchema("entity type is empty".into()));
        }
        let mut seen = HashSet::new();
        for f in &self.fields {
            if !f.path.starts_with('/') {
                return Err(ModelError::InvalidSchema(format!(
                    "{}: field path {:?} is not a JSON pointer",
                    self.entity_type, f.path
                )));
            }
            if !seen.insert(f.path.as_str()) {
                return Err(ModelError::InvalidSchema(format!(
                    "{}: duplicate field path {}",
                    self.entity_type, f.path
                )));
            }
        }
        Ok(())
    }

    /// Checks a payload against the declared fields.
    /// Returns a reason on the first violation.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        for f in &self.fields {
            match value.pointer(&f.path) {
                None | Some(Value::Null) if f.required => {
                    return Err(format!("missing required field {}", f.path));
                }
                None | Some(Value::Null) => {}
                Some(v) if !f.field_type.matches(v) => {
                    return Err(format!("field {} is not {:?}", f.path, f.field_type));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// A field inside an entity payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// JSON pointer path (e.g., "/title", "/tags").
    pub path: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    fn simple(path: &str, field_type: FieldType) -> Self {
        Self {
            path: path.into(),
            field_type,
            required: false,
        }
    }

    /// Shorthand for a text field.
    pub fn text(path: &str) -> Self {
        Self::simple(path, FieldType::Text)
    }

    /// Shorthand for a tag array field.
    pub fn tag(path: &str) -> Self {
        Self::simple(path, FieldType::Tag)
    }

    /// Shorthand for a DateTime field (RFC 3339 string or integer epoch).
    pub fn datetime(path: &str) -> Self {
        Self::simple(path, FieldType::DateTime)
    }

    /// Shorthand for a numeric field.
    pub fn number(path: &str) -> Self {
        Self::simple(path, FieldType::Number)
    }

    /// Shorthand for a boolean field.
    pub fn bool(path: &str) -> Self {
        Self::simple(path, FieldType::Bool)
    }

    /// Shorthand for a JSON blob field (any value).
    pub fn json(path: &str) -> Self {
        Self::simple(path, FieldType::Json)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The data type of a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Tag,
    DateTime,
    Number,
    Bool,
    Json,
}

impl FieldType {
    /// Whether a present, non-null JSON value fits this type.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Tag => value
                .as_array()
                .is_some_and(|tags| tags.iter().all(Value::is_string)),
            Self::DateTime => match value {
                Value::String(s) => chrono::DateTime::parse_from_rfc3339(s).is_ok(),
                _ => value.is_i64() || value.is_u64(),
            },
            Self::Number => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::Json => true,
        }
    }
}
