pub mod flat;
pub mod query;
pub mod tree;

#[cfg(test)]
mod tests;

use crate::{
    MAX_NESTING_DEPTH,
    entity::Entity,
    model::{Direction, ServiceId},
    collection::CollectionError,
    path::{FieldPath, PathSegment},
    registry::{Registry, RegistryError},
    value::{CoercionError, Value},
};
use derive_more::Display;
use thiserror::Error as ThisError;

/// Entity wire codecs.
///
/// Two representations of the same content:
/// - `Flat` is a JSON object keyed by wire name.
/// - `Tree` is a namespaced element tree.
///
/// The format is always chosen by the caller. Both encoders emit present
/// fields in declaration order and omit absent ones; both decoders ignore
/// unknown fields and route scalars through assignment coercion.

///
/// SerializeError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SerializeError {
    #[error("invalid value at '{path}': {source}")]
    Coercion {
        path: String,
        source: CoercionError,
    },

    #[error("invalid collection at '{path}': {source}")]
    Collection {
        path: String,
        source: CollectionError,
    },

    #[error("failed to decode {format} payload: {message}")]
    Decode { format: WireFormat, message: String },

    #[error("failed to encode {format} payload: {message}")]
    Encode { format: WireFormat, message: String },

    #[error("expected a {expected} payload, got {found}")]
    FormatMismatch {
        expected: WireFormat,
        found: WireFormat,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("unexpected shape at '{path}': expected {expected}, found {found}")]
    Shape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("namespace '{0}' has no prefix mapping")]
    UnmappedNamespace(String),
}

impl SerializeError {
    pub(crate) fn decode(format: WireFormat, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn encode(format: WireFormat, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            format,
            message: err.to_string(),
        }
    }
}

///
/// WireFormat
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum WireFormat {
    Flat,
    Tree,
}

///
/// WireValue
///

#[derive(Clone, Debug, PartialEq)]
pub enum WireValue {
    Flat(serde_json::Value),
    Tree(tree::Element),
}

impl WireValue {
    #[must_use]
    pub const fn format(&self) -> WireFormat {
        match self {
            Self::Flat(_) => WireFormat::Flat,
            Self::Tree(_) => WireFormat::Tree,
        }
    }

    #[must_use]
    pub const fn as_flat(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Flat(value) => Some(value),
            Self::Tree(_) => None,
        }
    }

    #[must_use]
    pub const fn as_tree(&self) -> Option<&tree::Element> {
        match self {
            Self::Tree(element) => Some(element),
            Self::Flat(_) => None,
        }
    }
}

/// Render `entity` in `format`.
#[must_use]
pub fn to_wire(entity: &Entity, format: WireFormat) -> WireValue {
    match format {
        WireFormat::Flat => WireValue::Flat(flat::encode(entity)),
        WireFormat::Tree => WireValue::Tree(tree::encode(entity)),
    }
}

/// Decode `payload` into an entity of `type_id`.
///
/// The decoded entity and every nested entity carry `service` and
/// `direction` as their context.
pub fn from_wire(
    registry: &Registry,
    payload: &WireValue,
    format: WireFormat,
    type_id: &str,
    service: ServiceId,
    direction: Direction,
) -> Result<Entity, SerializeError> {
    if payload.format() != format {
        return Err(SerializeError::FormatMismatch {
            expected: format,
            found: payload.format(),
        });
    }

    let mut decoder = Decoder::new(registry, service, direction);
    let entity = match payload {
        WireValue::Flat(value) => flat::decode(&mut decoder, value, type_id),
        WireValue::Tree(element) => tree::decode(&mut decoder, element, type_id),
    }?;

    tracing::debug!(type_id, %format, "payload decoded");

    Ok(entity)
}

///
/// Decoder
///
/// Per-call decode state shared by both formats: the registry, the context
/// stamped onto decoded entities and the path used in diagnostics.
///

pub(crate) struct Decoder<'a> {
    registry: &'a Registry,
    service: ServiceId,
    direction: Direction,
    path: FieldPath,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(registry: &'a Registry, service: ServiceId, direction: Direction) -> Self {
        Self {
            registry,
            service,
            direction,
            path: FieldPath::new(),
            depth: 0,
        }
    }

    /// Open a nested entity of `type_id`, enforcing the nesting limit.
    pub(crate) fn open(&mut self, type_id: &str) -> Result<Entity, SerializeError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.shape("shallower nesting", "nesting too deep"));
        }
        self.depth += 1;
        let model = self.registry.describe(type_id)?;

        Ok(Entity::from_model(model, self.service, self.direction))
    }

    pub(crate) const fn close(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn push(&mut self, seg: impl Into<PathSegment>) {
        self.path.push(seg);
    }

    pub(crate) fn pop(&mut self) {
        self.path.pop();
    }

    /// Assign a decoded value, reporting coercion failures at the current path.
    pub(crate) fn assign(
        &self,
        entity: &mut Entity,
        pos: usize,
        value: Value,
    ) -> Result<(), SerializeError> {
        entity
            .set_at(pos, value)
            .map_err(|source| SerializeError::Coercion {
                path: self.here(),
                source,
            })
    }

    pub(crate) fn collection(&self, source: CollectionError) -> SerializeError {
        SerializeError::Collection {
            path: self.here(),
            source,
        }
    }

    pub(crate) fn shape(&self, expected: &'static str, found: &'static str) -> SerializeError {
        SerializeError::Shape {
            path: self.here(),
            expected,
            found,
        }
    }

    fn here(&self) -> String {
        if self.path.depth() == 0 {
            "$".to_string()
        } else {
            self.path.to_string()
        }
    }
}
