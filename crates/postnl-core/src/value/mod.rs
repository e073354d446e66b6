mod coercion;


use crate::{collection::OrderedCollection, entity::Entity};

// re-exports
pub use coercion::CoercionError;
pub(crate) use coercion::coerce;

///
/// Value
///
/// Property value held by an entity slot. Absence is modelled by an empty
/// slot, never by a variant.
///

#[derive(Clone, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Collection(OrderedCollection),
    Entity(Box<Entity>),
    Int(i64),
    Text(String),
    /// Ordered list of strings; order is preserved on both wire formats.
    TextList(Vec<String>),
}

impl Value {
    /// Short human-readable name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Collection(_) => "collection",
            Self::Entity(_) => "entity",
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::TextList(_) => "text list",
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_collection(&self) -> Option<&OrderedCollection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::TextList(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Self::TextList(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Self::Entity(Box::new(entity))
    }
}

impl From<OrderedCollection> for Value {
    fn from(collection: OrderedCollection) -> Self {
        Self::Collection(collection)
    }
}
