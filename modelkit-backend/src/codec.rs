//! Marshalling contract for entity payloads.
//!
//! Payloads are carried as `serde_json::Value`, the type-erased form every
//! serde type converts to. A codec decides only the byte representation.

use crate::error::CodecResult;
use serde_json::Value;

/// Trait for encoding/decoding entity payloads.
pub trait Codec: Send + Sync {
    /// Returns the name of the codec (e.g. "json").
    fn name(&self) -> &'static str;

    /// Encode `value` into bytes.
    fn marshal(&self, value: &Value) -> CodecResult<Vec<u8>>;

    /// Decode bytes previously produced by `marshal`.
    fn unmarshal(&self, data: &[u8]) -> CodecResult<Value>;
}
