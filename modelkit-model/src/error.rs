//! Error types for the model layer.

use modelkit_backend::{CodecError, StoreError};
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur in model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A CRUD operation ran before a store and codec were configured.
    #[error("model not configured: missing {0}")]
    NotConfigured(&'static str),

    /// An option rejected its input.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// A schema failed validation at registration.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The entity type is already registered with a different schema.
    #[error("conflicting registration for entity type: {0}")]
    Conflict(String),

    /// The entity names a type nobody registered.
    #[error("unregistered entity type: {0}")]
    Unregistered(String),

    /// The entity failed validation.
    #[error("invalid entity {id}: {reason}")]
    InvalidEntity { id: String, reason: String },

    /// An entity with this id already exists.
    #[error("entity already exists: {0}")]
    AlreadyExists(String),

    /// No entity with this id exists.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The stored entity type differs from the one the caller expected.
    #[error("entity {id} has type {actual:?}, expected {expected}")]
    TypeMismatch {
        id: String,
        expected: String,
        actual: Option<String>,
    },

    /// Store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Codec failure.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Conversion between typed values and JSON payloads failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    /// Whether this error means the entity was absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub(crate) fn invalid_entity(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEntity {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
