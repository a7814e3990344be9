//! Collaborator contracts for modelkit.
//!
//! A model never persists or serializes anything itself. It is handed two
//! collaborators at configuration time:
//! - [`Store`] — keyed persistence of opaque byte records ([`StoreRecord`])
//! - [`Codec`] — marshalling of JSON payloads to bytes and back
//!
//! This crate defines only the contracts. Engines and codecs live with
//! whoever plugs them in.

mod codec;
mod error;
mod store;

pub use codec::Codec;
pub use error::{CodecError, CodecResult, StoreError, StoreResult};
pub use store::{Store, StoreRecord};
