use crate::{model::field::FieldModel, registry::RegistryError};
use std::collections::HashMap;

///
/// EntityDecl
///
/// Static declaration of one entity type. Written once per type as a
/// `static`; field order is authoritative for validation precedence and
/// wire field order.
///

#[derive(Debug)]
pub struct EntityDecl {
    /// Stable type id used for registry lookups and nested references.
    pub type_id: &'static str,
    /// Element name used when the entity is the root of a tree payload.
    pub element: &'static str,
    /// Namespace URI of the entity's element and its field elements.
    pub namespace: &'static str,
    pub fields: &'static [FieldModel],
}

impl EntityDecl {
    #[must_use]
    pub const fn new(
        type_id: &'static str,
        element: &'static str,
        namespace: &'static str,
        fields: &'static [FieldModel],
    ) -> Self {
        Self {
            type_id,
            element,
            namespace,
            fields,
        }
    }
}

///
/// EntityModel
///
/// Built, immutable runtime metadata for one entity type. Shared through the
/// registry as `Arc<EntityModel>`; entities hold a handle to it.
///

#[derive(Debug)]
pub struct EntityModel {
    pub type_id: &'static str,
    pub element: &'static str,
    pub namespace: &'static str,
    /// Ordered descriptor list.
    pub fields: &'static [FieldModel],
    by_name: HashMap<&'static str, usize>,
    by_wire: HashMap<&'static str, usize>,
}

impl EntityModel {
    /// Build the runtime model, checking declaration invariants.
    pub(crate) fn build(decl: &EntityDecl) -> Result<Self, RegistryError> {
        let mut by_name = HashMap::with_capacity(decl.fields.len());
        let mut by_wire = HashMap::with_capacity(decl.fields.len());

        for (pos, field) in decl.fields.iter().enumerate() {
            if let Some(service) = field.conflicting_service() {
                return Err(RegistryError::ConflictingRule {
                    type_id: decl.type_id,
                    field: field.name,
                    service,
                });
            }
            if by_name.insert(field.name, pos).is_some() {
                return Err(RegistryError::DuplicateField {
                    type_id: decl.type_id,
                    field: field.name,
                });
            }
            if by_wire.insert(field.wire_name, pos).is_some() {
                return Err(RegistryError::DuplicateField {
                    type_id: decl.type_id,
                    field: field.wire_name,
                });
            }
        }

        Ok(Self {
            type_id: decl.type_id,
            element: decl.element,
            namespace: decl.namespace,
            fields: decl.fields,
            by_name,
            by_wire,
        })
    }

    /// Position of the property called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Position of the property whose wire name is `wire_name`.
    #[must_use]
    pub fn position_by_wire(&self, wire_name: &str) -> Option<usize> {
        self.by_wire.get(wire_name).copied()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        let fields = self.fields;
        self.position(name).map(|pos| &fields[pos])
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
