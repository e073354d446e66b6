//! Required-property validation.
//!
//! Walks descriptors in declaration order and stops at the first property
//! that is required for the active service and direction but absent. Present
//! nested entities and collection elements are checked depth-first at their
//! position in the walk.
use crate::{
    entity::Entity,
    model::{Direction, ServiceId},
    path::FieldPath,
    value::Value,
};
use thiserror::Error as ThisError;

///
/// ValidateError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("required property '{property}' is missing")]
    MissingRequired { property: String },
}

impl ValidateError {
    /// Dotted path of the offending property.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::MissingRequired { property } => property,
        }
    }
}

/// Validate `entity` for `service` travelling in `direction`.
pub fn validate(
    entity: &Entity,
    service: ServiceId,
    direction: Direction,
) -> Result<(), ValidateError> {
    let mut path = FieldPath::new();

    walk(entity, service, direction, &mut path)
}

fn walk(
    entity: &Entity,
    service: ServiceId,
    direction: Direction,
    path: &mut FieldPath,
) -> Result<(), ValidateError> {
    let fields = entity.model().fields;

    for (field, slot) in fields.iter().zip(entity.slots()) {
        // unlisted properties are neither required nor descended into
        if !field.is_listed_for(service, direction) {
            continue;
        }

        match slot {
            None if field.is_required_for(service, direction) => {
                return Err(ValidateError::MissingRequired {
                    property: path.render_with(field.name),
                });
            }
            Some(Value::Entity(nested)) => {
                path.push(field.name);
                walk(nested, service, direction, path)?;
                path.pop();
            }
            Some(Value::Collection(items)) => {
                path.push(field.name);
                for (i, item) in items.values().enumerate() {
                    path.push(i);
                    walk(item, service, direction, path)?;
                    path.pop();
                }
                path.pop();
            }
            _ => {}
        }
    }

    Ok(())
}
