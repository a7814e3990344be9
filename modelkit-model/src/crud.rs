//! Direct CRUD model: one store record per entity.
//!
//! Keys are `{namespace}/{id}`. The entity type travels in the record
//! metadata so reads can restore it. Existence checks and writes are
//! separate store calls; concurrent writers to one id race at the store.

use modelkit_backend::{Codec, Store, StoreError, StoreRecord};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::entity::{Entity, Record};
use crate::error::{ModelError, ModelResult};
use crate::model::Model;
use crate::options::{
    CreateOptions, DeleteOptions, ModelOption, Options, ReadOptions, TYPE_KEY, UpdateOptions,
};
use crate::schema::EntitySchema;

/// The CRUD model.
#[derive(Debug, Default)]
pub struct Crud {
    options: Options,
    schemas: HashMap<String, EntitySchema>,
}

impl Crud {
    /// An unconfigured model. Call `init` before any CRUD operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and initializes a model in one step.
    pub fn with_options(options: Vec<ModelOption>) -> ModelResult<Self> {
        let mut model = Self::new();
        model.init(options)?;
        Ok(model)
    }

    /// The schema registered for `entity_type`.
    pub fn schema(&self, entity_type: &str) -> Option<&EntitySchema> {
        self.schemas.get(entity_type)
    }

    /// Ids of all entities in this model's namespace, in key order.
    pub fn ids(&self) -> ModelResult<Vec<String>> {
        let (store, _) = self.collaborators()?;
        let prefix = self.key("");
        Ok(store
            .list(&prefix)?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }

    fn key(&self, id: &str) -> String {
        format!("{}/{}", self.options.settings.namespace, id)
    }

    fn collaborators(&self) -> ModelResult<(&dyn Store, &dyn Codec)> {
        let store = self
            .options
            .store
            .as_deref()
            .ok_or(ModelError::NotConfigured("store"))?;
        let codec = self
            .options
            .codec
            .as_deref()
            .ok_or(ModelError::NotConfigured("codec"))?;
        Ok((store, codec))
    }

    /// Checks a payload against the schema of `entity_type`.
    fn validate_payload(&self, id: &str, entity_type: Option<&str>, value: &Value) -> ModelResult<()> {
        match entity_type {
            Some(entity_type) => {
                let schema = self
                    .schemas
                    .get(entity_type)
                    .ok_or_else(|| ModelError::Unregistered(entity_type.to_string()))?;
                schema
                    .check(value)
                    .map_err(|reason| ModelError::invalid_entity(id, reason))
            }
            None if self.options.settings.require_registration => {
                Err(ModelError::invalid_entity(id, "entity has no registered type"))
            }
            None => Ok(()),
        }
    }

    fn read_stored(&self, store: &dyn Store, key: &str) -> ModelResult<Option<StoreRecord>> {
        match store.read(key) {
            Ok(record) => Ok(Some(record)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn encode(
        &self,
        codec: &dyn Codec,
        entity: &dyn Entity,
        entity_type: Option<&str>,
        ttl: Option<Duration>,
        metadata: BTreeMap<String, String>,
    ) -> ModelResult<StoreRecord> {
        let mut record = StoreRecord::new(self.key(entity.id()), codec.marshal(entity.value())?);
        record.metadata = metadata;
        if let Some(entity_type) = entity_type {
            record.metadata.insert(TYPE_KEY.to_string(), entity_type.to_string());
        }
        record.expiry = ttl;
        Ok(record)
    }

    fn rejected<T>(&self, op: &str, id: &str, err: ModelError) -> ModelResult<T> {
        warn!(op, id, error = %err, "rejected operation");
        Err(err)
    }
}

/// Ids become one key segment: non-empty and free of `/`.
fn validate_id(id: &str) -> ModelResult<()> {
    if id.is_empty() {
        return Err(ModelError::invalid_entity(id, "id is empty"));
    }
    if id.contains('/') {
        return Err(ModelError::invalid_entity(id, "id contains '/'"));
    }
    Ok(())
}

impl Model for Crud {
    fn init(&mut self, options: Vec<ModelOption>) -> ModelResult<()> {
        let mut next = self.options.clone();
        for option in options {
            option.apply(&mut next)?;
        }
        self.options = next;
        debug!(options = ?self.options, "model initialized");
        Ok(())
    }

    fn options(&self) -> Options {
        self.options.clone()
    }

    fn register(&mut self, schema: EntitySchema) -> ModelResult<()> {
        schema.validate()?;
        if let Some(existing) = self.schemas.get(&schema.entity_type) {
            if *existing == schema {
                return Ok(());
            }
            return Err(ModelError::Conflict(schema.entity_type));
        }
        debug!(entity_type = %schema.entity_type, fields = schema.fields.len(), "registered entity type");
        self.schemas.insert(schema.entity_type.clone(), schema);
        Ok(())
    }

    fn create(&self, entity: &dyn Entity, opts: CreateOptions) -> ModelResult<()> {
        opts.validate()?;
        let (store, codec) = self.collaborators()?;
        let id = entity.id();
        let entity_type = entity.entity_type();
        if let Err(e) =
            validate_id(id).and_then(|()| self.validate_payload(id, entity_type, entity.value()))
        {
            return self.rejected("create", id, e);
        }
        let key = self.key(id);
        if store.exists(&key)? {
            return self.rejected("create", id, ModelError::AlreadyExists(id.to_string()));
        }
        store.write(self.encode(codec, entity, entity_type, opts.ttl, opts.metadata)?)?;
        debug!(%key, ?entity_type, "created entity");
        Ok(())
    }

    fn read(&self, record: &mut Record, opts: ReadOptions) -> ModelResult<()> {
        opts.validate()?;
        let (store, codec) = self.collaborators()?;
        if let Err(e) = validate_id(&record.id) {
            return self.rejected("read", &record.id, e);
        }
        let key = self.key(&record.id);
        let stored = self
            .read_stored(store, &key)?
            .ok_or_else(|| ModelError::NotFound(record.id.clone()))?;
        let entity_type = stored.meta(TYPE_KEY).map(str::to_string);
        if let Some(expected) = opts.expected_type {
            if entity_type.as_deref() != Some(expected.as_str()) {
                return Err(ModelError::TypeMismatch {
                    id: record.id.clone(),
                    expected,
                    actual: entity_type,
                });
            }
        }
        record.value = codec.unmarshal(&stored.value)?;
        record.entity_type = entity_type;
        debug!(%key, "read entity");
        Ok(())
    }

    /// An untyped entity keeps the stored type and is checked against its
    /// schema; naming a different type is a `TypeMismatch`. Stored metadata
    /// carries over, with `opts.metadata` overriding per key.
    fn update(&self, entity: &dyn Entity, opts: UpdateOptions) -> ModelResult<()> {
        opts.validate()?;
        let (store, codec) = self.collaborators()?;
        let id = entity.id();
        if let Err(e) = validate_id(id) {
            return self.rejected("update", id, e);
        }
        let key = self.key(id);
        let (entity_type, mut metadata) = match self.read_stored(store, &key)? {
            Some(mut prev) => {
                let prev_type = prev.metadata.remove(TYPE_KEY);
                if let (Some(old), Some(new)) = (prev_type.as_deref(), entity.entity_type()) {
                    if old != new {
                        let err = ModelError::TypeMismatch {
                            id: id.to_string(),
                            expected: old.to_string(),
                            actual: Some(new.to_string()),
                        };
                        return self.rejected("update", id, err);
                    }
                }
                let entity_type = entity.entity_type().map(str::to_string).or(prev_type);
                (entity_type, prev.metadata)
            }
            None if opts.upsert => (entity.entity_type().map(str::to_string), BTreeMap::new()),
            None => return self.rejected("update", id, ModelError::NotFound(id.to_string())),
        };
        if let Err(e) = self.validate_payload(id, entity_type.as_deref(), entity.value()) {
            return self.rejected("update", id, e);
        }
        let upsert = opts.upsert;
        metadata.extend(opts.metadata);
        store.write(self.encode(codec, entity, entity_type.as_deref(), opts.ttl, metadata)?)?;
        debug!(%key, ?entity_type, upsert, "updated entity");
        Ok(())
    }

    fn delete(&self, entity: &dyn Entity, opts: DeleteOptions) -> ModelResult<()> {
        opts.validate()?;
        let (store, _) = self.collaborators()?;
        let id = entity.id();
        if let Err(e) = validate_id(id) {
            return self.rejected("delete", id, e);
        }
        let key = self.key(id);
        match store.delete(&key) {
            Ok(()) => {
                debug!(%key, "deleted entity");
                Ok(())
            }
            Err(StoreError::NotFound(_)) if opts.ignore_missing => Ok(()),
            Err(StoreError::NotFound(_)) => {
                self.rejected("delete", id, ModelError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "crud"
    }
}

impl fmt::Display for Crud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
