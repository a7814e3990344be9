//! Model configuration and per-operation options.
//!
//! Model-level configuration is built from functional options applied in
//! order by `Model::init`. Per-operation options are plain structs with
//! builder methods, validated when the operation runs.

use modelkit_backend::{Codec, Store};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ModelError, ModelResult};

/// Settings that can be loaded from configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Prefix of every store key the model writes.
    pub namespace: String,
    /// Reject entities that carry no registered type.
    pub require_registration: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            namespace: "model".to_string(),
            require_registration: false,
        }
    }
}

impl ModelSettings {
    /// Parses settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        validate_namespace(&settings.namespace)?;
        Ok(settings)
    }
}

/// The collaborators and settings a model runs against.
#[derive(Clone, Default)]
pub struct Options {
    /// The store for data storage.
    pub store: Option<Arc<dyn Store>>,
    /// The codec for marshalling.
    pub codec: Option<Arc<dyn Codec>>,
    pub settings: ModelSettings,
}

impl Options {
    /// Whether both collaborators are set.
    pub fn is_configured(&self) -> bool {
        self.store.is_some() && self.codec.is_some()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("store", &self.store.as_ref().map(|s| s.name()))
            .field("codec", &self.codec.as_ref().map(|c| c.name()))
            .field("settings", &self.settings)
            .finish()
    }
}

/// Metadata key holding the entity type. Reserved for the model.
pub(crate) const TYPE_KEY: &str = "entity_type";

type ApplyFn = Box<dyn FnOnce(&mut Options) -> ModelResult<()> + Send>;

/// A configuration step passed to `Model::init`.
pub struct ModelOption(ApplyFn);

impl ModelOption {
    /// Wraps a caller-defined configuration step.
    pub fn new<F>(apply: F) -> Self
    where
        F: FnOnce(&mut Options) -> ModelResult<()> + Send + 'static,
    {
        Self(Box::new(apply))
    }

    pub(crate) fn apply(self, options: &mut Options) -> ModelResult<()> {
        (self.0)(options)
    }
}

impl fmt::Debug for ModelOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ModelOption")
    }
}

/// Sets the store collaborator.
pub fn with_store(store: Arc<dyn Store>) -> ModelOption {
    ModelOption::new(move |o| {
        o.store = Some(store);
        Ok(())
    })
}

/// Sets the codec collaborator.
pub fn with_codec(codec: Arc<dyn Codec>) -> ModelOption {
    ModelOption::new(move |o| {
        o.codec = Some(codec);
        Ok(())
    })
}

/// Sets the key namespace. Must be non-empty and contain no `/`.
pub fn with_namespace(namespace: impl Into<String>) -> ModelOption {
    let namespace = namespace.into();
    ModelOption::new(move |o| {
        validate_namespace(&namespace)?;
        o.settings.namespace = namespace;
        Ok(())
    })
}

/// Replaces all settings at once.
pub fn with_settings(settings: ModelSettings) -> ModelOption {
    ModelOption::new(move |o| {
        validate_namespace(&settings.namespace)?;
        o.settings = settings;
        Ok(())
    })
}

/// Rejects untyped entities on create and update when `required` is set.
pub fn require_registration(required: bool) -> ModelOption {
    ModelOption::new(move |o| {
        o.settings.require_registration = required;
        Ok(())
    })
}

fn validate_namespace(namespace: &str) -> ModelResult<()> {
    if namespace.is_empty() {
        return Err(ModelError::InvalidOption("namespace is empty".into()));
    }
    if namespace.contains('/') {
        return Err(ModelError::InvalidOption(format!(
            "namespace {namespace:?} contains '/'"
        )));
    }
    Ok(())
}

fn validate_ttl(ttl: Option<Duration>) -> ModelResult<()> {
    match ttl {
        Some(ttl) if ttl.is_zero() => Err(ModelError::InvalidOption("ttl must be non-zero".into())),
        _ => Ok(()),
    }
}

fn validate_metadata(metadata: &BTreeMap<String, String>) -> ModelResult<()> {
    if metadata.contains_key(TYPE_KEY) {
        return Err(ModelError::InvalidOption(format!(
            "metadata key {TYPE_KEY:?} is reserved"
        )));
    }
    Ok(())
}

// ── Per-operation options ────────────────────────────────────────

/// Options for writing new entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Expire the stored record after this long.
    pub ttl: Option<Duration>,
    /// Extra metadata stored alongside the record.
    pub metadata: BTreeMap<String, String>,
}

impl CreateOptions {
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        validate_ttl(self.ttl)?;
        validate_metadata(&self.metadata)
    }
}

/// Options for reading entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Fail unless the stored entity has this type.
    pub expected_type: Option<String>,
}

impl ReadOptions {
    #[must_use]
    pub fn expect_type(mut self, entity_type: impl Into<String>) -> Self {
        self.expected_type = Some(entity_type.into());
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        match &self.expected_type {
            Some(t) if t.trim().is_empty() => {
                Err(ModelError::InvalidOption("expected type is empty".into()))
            }
            _ => Ok(()),
        }
    }
}

/// Options for updating entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    pub ttl: Option<Duration>,
    pub metadata: BTreeMap<String, String>,
    /// Create the entity when it does not exist yet.
    pub upsert: bool,
}

impl UpdateOptions {
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn upsert(mut self) -> Self {
        self.upsert = true;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        validate_ttl(self.ttl)?;
        validate_metadata(&self.metadata)
    }
}

/// Options for deleting entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Succeed when the entity does not exist.
    pub ignore_missing: bool,
}

impl DeleteOptions {
    #[must_use]
    pub fn ignore_missing(mut self) -> Self {
        self.ignore_missing = true;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        Ok(())
    }
}
