//! Flat codec: a JSON object keyed by wire name.
use crate::{
    collection::OrderedCollection,
    entity::Entity,
    model::field::{FieldKind, FieldModel, PrimitiveKind},
    serialize::{Decoder, SerializeError, WireFormat},
    value::Value,
};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

/// Render an entity as a JSON object, fields in declaration order.
#[must_use]
pub fn encode(entity: &Entity) -> JsonValue {
    let mut map = Map::new();
    for (field, value) in entity.present() {
        map.insert(field.wire_name.to_string(), encode_value(value));
    }

    JsonValue::Object(map)
}

fn encode_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(v) => JsonValue::Bool(*v),
        Value::Collection(items) => JsonValue::Array(items.values().map(encode).collect()),
        Value::Entity(entity) => encode(entity),
        Value::Int(v) => JsonValue::from(*v),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::TextList(items) => {
            JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
        }
    }
}

pub fn to_bytes(value: &JsonValue) -> Result<Vec<u8>, SerializeError> {
    serde_json::to_vec(value).map_err(|err| SerializeError::encode(WireFormat::Flat, err))
}

pub fn from_bytes(bytes: &[u8]) -> Result<JsonValue, SerializeError> {
    serde_json::from_slice(bytes).map_err(|err| SerializeError::decode(WireFormat::Flat, err))
}

pub(crate) fn decode(
    decoder: &mut Decoder<'_>,
    json: &JsonValue,
    type_id: &str,
) -> Result<Entity, SerializeError> {
    let JsonValue::Object(map) = json else {
        return Err(decoder.shape("object", json_kind(json)));
    };

    let mut entity = decoder.open(type_id)?;
    let model = Arc::clone(entity.model());

    for (key, raw) in map {
        let Some(pos) = model.position_by_wire(key) else {
            continue;
        };
        // explicit null reads as absent
        if raw.is_null() {
            continue;
        }

        let field = &model.fields[pos];
        decoder.push(field.name);
        let value = decode_field(decoder, field, raw)?;
        decoder.assign(&mut entity, pos, value)?;
        decoder.pop();
    }

    decoder.close();

    Ok(entity)
}

fn decode_field(
    decoder: &mut Decoder<'_>,
    field: &FieldModel,
    raw: &JsonValue,
) -> Result<Value, SerializeError> {
    match field.kind {
        FieldKind::Primitive(PrimitiveKind::TextList) => match raw {
            JsonValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    decoder.push(i);
                    out.push(scalar_text(decoder, item)?);
                    decoder.pop();
                }

                Ok(Value::TextList(out))
            }
            other => scalar(decoder, other),
        },

        FieldKind::Primitive(_) => scalar(decoder, raw),

        FieldKind::Entity(type_id) => decode(decoder, raw, type_id).map(Value::from),

        FieldKind::Collection(type_id) => {
            let mut items = OrderedCollection::new(type_id);
            match raw {
                JsonValue::Array(elements) => {
                    for (i, element) in elements.iter().enumerate() {
                        decoder.push(i);
                        items
                            .push_decoded(decode(decoder, element, type_id)?)
                            .map_err(|err| decoder.collection(err))?;
                        decoder.pop();
                    }
                }
                // a lone object stands for a one-element collection
                JsonValue::Object(_) => items
                    .push_decoded(decode(decoder, raw, type_id)?)
                    .map_err(|err| decoder.collection(err))?,
                other => return Err(decoder.shape("array", json_kind(other))),
            }

            Ok(Value::Collection(items))
        }
    }
}

fn scalar(decoder: &Decoder<'_>, raw: &JsonValue) -> Result<Value, SerializeError> {
    match raw {
        JsonValue::Bool(v) => Ok(Value::Bool(*v)),
        JsonValue::Number(n) => Ok(n.as_i64().map_or_else(|| Value::Text(n.to_string()), Value::Int)),
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        other => Err(decoder.shape("scalar", json_kind(other))),
    }
}

fn scalar_text(decoder: &Decoder<'_>, raw: &JsonValue) -> Result<String, SerializeError> {
    match raw {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(decoder.shape("string", json_kind(other))),
    }
}

const fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
