//! Runtime entity: a typed record whose shape comes from an `EntityModel`.
use crate::{
    collection::OrderedCollection,
    model::{Direction, ServiceId, entity::EntityModel, field::FieldModel},
    registry::{Registry, RegistryError},
    validate::{self, ValidateError},
    value::{CoercionError, Value, coerce},
};
use std::sync::Arc;

///
/// Entity
///
/// One slot per declared property, in declaration order. The service and
/// direction are fixed at construction and decide which rules apply.
///

#[derive(Clone, Debug)]
pub struct Entity {
    model: Arc<EntityModel>,
    service: ServiceId,
    direction: Direction,
    slots: Vec<Option<Value>>,
}

impl Entity {
    /// Create an empty entity of `type_id`.
    pub fn new(
        registry: &Registry,
        type_id: &str,
        service: ServiceId,
        direction: Direction,
    ) -> Result<Self, RegistryError> {
        let model = registry.describe(type_id)?;

        Ok(Self::from_model(model, service, direction))
    }

    #[must_use]
    pub fn from_model(model: Arc<EntityModel>, service: ServiceId, direction: Direction) -> Self {
        let slots = vec![None; model.len()];

        Self {
            model,
            service,
            direction,
            slots,
        }
    }

    #[must_use]
    pub fn type_id(&self) -> &'static str {
        self.model.type_id
    }

    #[must_use]
    pub const fn model(&self) -> &Arc<EntityModel> {
        &self.model
    }

    #[must_use]
    pub const fn service(&self) -> ServiceId {
        self.service
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Value of the property called `name`, if it is declared and present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.model
            .position(name)
            .and_then(|pos| self.slots[pos].as_ref())
    }

    /// Assign a property, coercing the value into its declared kind.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), CoercionError> {
        let pos = self.position(name)?;

        self.set_at(pos, value.into())
    }

    /// Builder form of [`Entity::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, CoercionError> {
        self.set(name, value)?;

        Ok(self)
    }

    /// Empty the slot for `name`, returning the previous value.
    pub fn clear(&mut self, name: &str) -> Result<Option<Value>, CoercionError> {
        let pos = self.position(name)?;

        Ok(self.slots[pos].take())
    }

    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn text_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_text_list)
    }

    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Self> {
        self.get(name).and_then(Value::as_entity)
    }

    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&OrderedCollection> {
        self.get(name).and_then(Value::as_collection)
    }

    /// Present properties in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (&'static FieldModel, &Value)> + '_ {
        let fields = self.model.fields;

        fields
            .iter()
            .zip(&self.slots)
            .filter_map(|(field, slot)| slot.as_ref().map(|value| (field, value)))
    }

    /// Validate against the entity's own service and direction.
    pub fn validate(&self) -> Result<(), ValidateError> {
        validate::validate(self, self.service, self.direction)
    }

    pub(crate) fn slots(&self) -> &[Option<Value>] {
        &self.slots
    }

    pub(crate) fn set_at(&mut self, pos: usize, value: Value) -> Result<(), CoercionError> {
        let field = &self.model.fields[pos];
        self.slots[pos] = Some(coerce(field, value)?);

        Ok(())
    }

    fn position(&self, name: &str) -> Result<usize, CoercionError> {
        self.model
            .position(name)
            .ok_or_else(|| CoercionError::UnknownProperty {
                type_id: self.model.type_id,
                property: name.to_string(),
            })
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.model.type_id == other.model.type_id
            && self.service == other.service
            && self.direction == other.direction
            && self.slots == other.slots
    }
}

impl Eq for Entity {}
