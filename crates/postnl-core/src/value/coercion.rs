use crate::{
    model::field::{FieldKind, FieldModel, PrimitiveKind},
    value::Value,
};
use thiserror::Error as ThisError;

///
/// CoercionError
///
/// Raised at assignment time, before anything reaches a wire codec.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum CoercionError {
    #[error("property '{property}' expects entity '{expected}', got '{found}'")]
    EntityMismatch {
        property: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("property '{property}' expects {expected}, got {found}")]
    KindMismatch {
        property: &'static str,
        expected: FieldKind,
        found: &'static str,
    },

    #[error("invalid `{property}` value passed: {raw}")]
    TypeCoercion { property: &'static str, raw: String },

    #[error("unknown property '{property}' on '{type_id}'")]
    UnknownProperty {
        type_id: &'static str,
        property: String,
    },
}

/// Coerce an assigned value into the shape `field` declares.
///
/// Numeric text assigned to an `Int` property becomes an integer here, so
/// serializers only ever see values of the declared kind.
pub(crate) fn coerce(field: &FieldModel, value: Value) -> Result<Value, CoercionError> {
    match (field.kind, value) {
        (FieldKind::Primitive(kind), value) => coerce_primitive(field, kind, value),

        (FieldKind::Entity(expected), Value::Entity(entity)) => {
            if entity.type_id() == expected {
                Ok(Value::Entity(entity))
            } else {
                Err(CoercionError::EntityMismatch {
                    property: field.name,
                    expected,
                    found: entity.type_id(),
                })
            }
        }

        (FieldKind::Collection(expected), Value::Collection(collection)) => {
            if collection.element_type() == expected {
                Ok(Value::Collection(collection))
            } else {
                Err(CoercionError::EntityMismatch {
                    property: field.name,
                    expected,
                    found: collection.element_type(),
                })
            }
        }

        (kind, other) => Err(CoercionError::KindMismatch {
            property: field.name,
            expected: kind,
            found: other.kind_name(),
        }),
    }
}

fn coerce_primitive(
    field: &FieldModel,
    kind: PrimitiveKind,
    value: Value,
) -> Result<Value, CoercionError> {
    match (kind, value) {
        (PrimitiveKind::Text, v @ Value::Text(_))
        | (PrimitiveKind::Int, v @ Value::Int(_))
        | (PrimitiveKind::Bool, v @ Value::Bool(_))
        | (PrimitiveKind::TextList, v @ Value::TextList(_)) => Ok(v),

        (PrimitiveKind::Int, Value::Text(raw)) => match raw.trim().parse::<i64>() {
            Ok(v) => Ok(Value::Int(v)),
            Err(_) => Err(CoercionError::TypeCoercion {
                property: field.name,
                raw,
            }),
        },

        (PrimitiveKind::Bool, Value::Text(raw)) => match raw.trim() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(CoercionError::TypeCoercion {
                property: field.name,
                raw,
            }),
        },

        (PrimitiveKind::Bool, Value::Int(v @ (0 | 1))) => Ok(Value::Bool(v == 1)),

        // carriers echo numeric text (house numbers, codes) as JSON numbers
        (PrimitiveKind::Text, Value::Int(v)) => Ok(Value::Text(v.to_string())),

        (PrimitiveKind::TextList, Value::Text(item)) => Ok(Value::TextList(vec![item])),

        (kind, other) => Err(CoercionError::KindMismatch {
            property: field.name,
            expected: FieldKind::Primitive(kind),
            found: other.kind_name(),
        }),
    }
}
