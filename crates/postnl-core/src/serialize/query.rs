//! Query-pair rendering for GET endpoints.
use crate::{entity::Entity, value::Value};

/// Render the scalar fields of `entity` as ordered `(wire name, value)` pairs.
///
/// Text lists are comma-joined. Nested entities and collections have no
/// query form and are skipped; callers flatten them explicitly.
#[must_use]
pub fn to_query(entity: &Entity) -> Vec<(String, String)> {
    entity
        .present()
        .filter_map(|(field, value)| {
            let rendered = match value {
                Value::Bool(v) => v.to_string(),
                Value::Int(v) => v.to_string(),
                Value::Text(s) => s.clone(),
                Value::TextList(items) => items.join(","),
                Value::Entity(_) | Value::Collection(_) => return None,
            };

            Some((field.wire_name.to_string(), rendered))
        })
        .collect()
}
