//! Process-wide property metadata registry.
//!
//! Declarations are handed over at construction; models are built lazily on
//! first `describe` and cached for the life of the registry. Builders run
//! outside the write lock, so two callers racing on the same type may both
//! build, but only the first inserted model is ever handed out.
use crate::model::{
    ServiceId,
    entity::{EntityDecl, EntityModel},
};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum RegistryError {
    #[error("field '{field}' on '{type_id}' is both required and optional for {service}")]
    ConflictingRule {
        type_id: &'static str,
        field: &'static str,
        service: ServiceId,
    },

    #[error("field '{field}' is declared twice on '{type_id}'")]
    DuplicateField {
        type_id: &'static str,
        field: &'static str,
    },

    #[error("no metadata registered for type '{0}'")]
    UnknownType(String),
}

///
/// Registry
///

#[derive(Debug)]
pub struct Registry {
    declarations: HashMap<&'static str, &'static EntityDecl>,
    built: RwLock<HashMap<&'static str, Arc<EntityModel>>>,
}

impl Registry {
    /// Create a registry over a fixed set of declarations.
    ///
    /// If two declarations share a type id the first one is kept.
    #[must_use]
    pub fn new(declarations: &[&'static EntityDecl]) -> Self {
        let mut map = HashMap::with_capacity(declarations.len());
        for decl in declarations {
            map.entry(decl.type_id).or_insert(*decl);
        }

        Self {
            declarations: map,
            built: RwLock::new(HashMap::new()),
        }
    }

    /// Return the model for `type_id`, building it on first use.
    pub fn describe(&self, type_id: &str) -> Result<Arc<EntityModel>, RegistryError> {
        if let Some(model) = self.read().get(type_id) {
            return Ok(Arc::clone(model));
        }

        let decl = self
            .declarations
            .get(type_id)
            .ok_or_else(|| RegistryError::UnknownType(type_id.to_string()))?;

        let model = Arc::new(EntityModel::build(decl)?);
        tracing::debug!(type_id = decl.type_id, fields = model.len(), "entity model built");

        let mut built = self.write();
        let winner = built.entry(decl.type_id).or_insert(model);

        Ok(Arc::clone(winner))
    }

    /// Returns `true` if a declaration exists for `type_id`.
    #[must_use]
    pub fn contains(&self, type_id: &str) -> bool {
        self.declarations.contains_key(type_id)
    }

    /// Number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of types whose model has been built so far.
    #[must_use]
    pub fn built_len(&self) -> usize {
        self.read().len()
    }

    /// Declared type ids, in no particular order.
    pub fn type_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.declarations.keys().copied()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<&'static str, Arc<EntityModel>>> {
        self.built
            .read()
            .expect("registry RwLock poisoned while acquiring read lock")
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<&'static str, Arc<EntityModel>>> {
        self.built
            .write()
            .expect("registry RwLock poisoned while acquiring write lock")
    }
}
