//! Data model contract for modelkit.
//!
//! Defines the surface every data-access strategy implements:
//! - [`Model`] — init/options, entity construction, type registration and CRUD
//! - [`Entity`] / [`Record`] — an identified record with an opaque JSON payload
//! - [`Options`] / [`ModelOption`] — the store and codec a model runs against
//! - [`CreateOptions`], [`ReadOptions`], [`UpdateOptions`], [`DeleteOptions`]
//! - [`EntitySchema`] — the shape of a registered entity type
//!
//! [`Crud`] is the straightforward implementation: one store record per
//! entity, keyed by namespace and id.

mod crud;
mod entity;
mod error;
mod model;
mod options;
mod schema;

pub use crud::Crud;
pub use entity::{Entity, Record};
pub use error::{ModelError, ModelResult};
pub use model::{Model, ModelExt};
pub use options::{
    require_registration, with_codec, with_namespace, with_settings, with_store, CreateOptions,
    DeleteOptions, ModelOption, ModelSettings, Options, ReadOptions, UpdateOptions,
};
pub use schema::{EntitySchema, FieldSpec, FieldType};
