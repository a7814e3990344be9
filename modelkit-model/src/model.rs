use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::entity::{Entity, Record};
use crate::error::ModelResult;
use crate::options::{CreateOptions, DeleteOptions, ModelOption, Options, ReadOptions, UpdateOptions};
use crate::schema::EntitySchema;

/// A data model: entity access over a configured store and codec.
///
/// `Display` renders the same label as [`Model::name`].
pub trait Model: Send + Sync + fmt::Display {
    /// Applies options in order. On failure the previous configuration is kept.
    fn init(&mut self, options: Vec<ModelOption>) -> ModelResult<()>;

    /// Snapshot of the current configuration.
    fn options(&self) -> Options;

    /// Builds an untyped entity.
    fn new_entity(&self, id: &str, value: Value) -> Record {
        Record::new(id, value)
    }

    /// Registers an entity type.
    fn register(&mut self, schema: EntitySchema) -> ModelResult<()>;

    /// Persists a new entity.
    fn create(&self, entity: &dyn Entity, opts: CreateOptions) -> ModelResult<()>;

    /// Fills `record` with the data stored under `record.id`.
    fn read(&self, record: &mut Record, opts: ReadOptions) -> ModelResult<()>;

    /// Persists changes to an existing entity.
    fn update(&self, entity: &dyn Entity, opts: UpdateOptions) -> ModelResult<()>;

    /// Removes an entity.
    fn delete(&self, entity: &dyn Entity, opts: DeleteOptions) -> ModelResult<()>;

    /// The implementation, e.g. "crud".
    fn name(&self) -> &'static str;
}

/// Typed helpers available on every [`Model`].
pub trait ModelExt: Model {
    /// Reads the entity stored under `id`.
    fn fetch(&self, id: &str) -> ModelResult<Record> {
        let mut record = Record::for_id(id);
        self.read(&mut record, ReadOptions::default())?;
        Ok(record)
    }

    /// Reads the entity stored under `id` and deserializes its payload.
    fn read_value<T: DeserializeOwned>(&self, id: &str) -> ModelResult<T> {
        self.fetch(id)?.decode()
    }

    /// Serializes `value` and creates an untyped entity from it.
    fn create_value<T: Serialize>(&self, id: &str, value: &T) -> ModelResult<Record> {
        let record = Record::from_serialize(id, value)?;
        self.create(&record, CreateOptions::default())?;
        Ok(record)
    }
}

impl<M: Model + ?Sized> ModelExt for M {}
