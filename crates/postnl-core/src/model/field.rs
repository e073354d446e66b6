use crate::model::{Direction, ServiceId};
use derive_more::Display;

///
/// PrimitiveKind
///
/// Scalar shapes a property can hold.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum PrimitiveKind {
    Bool,
    Int,
    Text,
    /// Ordered list of strings (carrier "options" style fields).
    TextList,
}

///
/// FieldKind
///
/// Runtime shape of a property. Nested types are referenced by type id and
/// resolved through the registry.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    Entity(&'static str),
    Collection(&'static str),
}

impl FieldKind {
    pub const BOOL: Self = Self::Primitive(PrimitiveKind::Bool);
    pub const INT: Self = Self::Primitive(PrimitiveKind::Int);
    pub const TEXT: Self = Self::Primitive(PrimitiveKind::Text);
    pub const TEXT_LIST: Self = Self::Primitive(PrimitiveKind::TextList);

    /// Type id of the nested entity, for entity and collection fields.
    #[must_use]
    pub const fn nested_type(self) -> Option<&'static str> {
        match self {
            Self::Entity(type_id) | Self::Collection(type_id) => Some(type_id),
            Self::Primitive(_) => None,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Entity(type_id) => write!(f, "entity '{type_id}'"),
            Self::Collection(type_id) => write!(f, "collection of '{type_id}'"),
        }
    }
}

///
/// FieldModel
///
/// Property descriptor: name, wire name, shape and the per-service rules for
/// the direction the property belongs to.
///
/// A service must never appear in both `required_for` and `optional_for`;
/// the registry rejects such declarations when the model is built.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Property name used by callers.
    pub name: &'static str,
    /// Name used on the wire (defaults to `name`).
    pub wire_name: &'static str,
    pub kind: FieldKind,
    pub direction: Direction,
    pub required_for: &'static [ServiceId],
    pub optional_for: &'static [ServiceId],
}

impl FieldModel {
    /// Declare a request-side property with no service rules yet.
    #[must_use]
    pub const fn request(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Direction::Request)
    }

    /// Declare a response-side property with no service rules yet.
    #[must_use]
    pub const fn response(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Direction::Response)
    }

    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, direction: Direction) -> Self {
        Self {
            name,
            wire_name: name,
            kind,
            direction,
            required_for: &[],
            optional_for: &[],
        }
    }

    #[must_use]
    pub const fn wire(self, wire_name: &'static str) -> Self {
        Self { wire_name, ..self }
    }

    #[must_use]
    pub const fn required(self, services: &'static [ServiceId]) -> Self {
        Self {
            required_for: services,
            ..self
        }
    }

    #[must_use]
    pub const fn optional(self, services: &'static [ServiceId]) -> Self {
        Self {
            optional_for: services,
            ..self
        }
    }

    /// Returns `true` if the property must be present for `service` in `direction`.
    #[must_use]
    pub fn is_required_for(&self, service: ServiceId, direction: Direction) -> bool {
        self.direction == direction && self.required_for.contains(&service)
    }

    /// Returns `true` if the property is listed at all for `service` in `direction`.
    #[must_use]
    pub fn is_listed_for(&self, service: ServiceId, direction: Direction) -> bool {
        self.direction == direction
            && (self.required_for.contains(&service) || self.optional_for.contains(&service))
    }

    // first service named in both rule lists, if any
    pub(crate) fn conflicting_service(&self) -> Option<ServiceId> {
        self.required_for
            .iter()
            .copied()
            .find(|service| self.optional_for.contains(service))
    }
}
