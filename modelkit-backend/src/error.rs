//! Error types for the collaborator contracts.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a [`Store`](crate::Store) reports.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record is stored under the key.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The key is not acceptable to the store.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The store is closed or otherwise unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// IO error (file system, socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error means the key was absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors a [`Codec`](crate::Codec) reports.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// The bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The value kind is not supported by this codec.
    #[error("unsupported value: {0}")]
    Unsupported(String),
}
