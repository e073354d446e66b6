//! Request fingerprints for the response cache.
use crate::{entity::Entity, model::ServiceId, serialize::flat};
use derive_more::{Deref, Display};
use xxhash_rust::xxh3::Xxh3;

///
/// Fingerprint
///
/// Opaque cache key: a lowercase hex xxh3-128 digest of the logical request.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint of `entity` sent to `operation` of `service`.
    ///
    /// The entity contributes its type id and its flat rendering, so two
    /// requests collide only if they carry the same present values.
    #[must_use]
    pub fn for_request(service: ServiceId, operation: &str, entity: &Entity) -> Self {
        let body = flat::encode(entity).to_string();

        Self::from_parts(&[
            service.name().as_bytes(),
            operation.as_bytes(),
            entity.type_id().as_bytes(),
            body.as_bytes(),
        ])
    }

    /// Fingerprint of an arbitrary sequence of byte parts.
    #[must_use]
    pub fn from_parts(parts: &[&[u8]]) -> Self {
        let mut h = Xxh3::new();
        for part in parts {
            feed_bytes(&mut h, part);
        }

        Self(format!("{:032x}", h.digest128()))
    }

    /// Wrap an existing key, e.g. one read back from an external store.
    #[must_use]
    pub fn from_hex(hex: &str) -> Self {
        Self(hex.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// length prefix keeps ("ab", "c") and ("a", "bc") apart
fn feed_bytes(h: &mut Xxh3, b: &[u8]) {
    h.update(&(b.len() as u64).to_be_bytes());
    h.update(b);
}
