//! Carrier-agnostic runtime core: entity metadata, validation, the flat and
//! tree wire codecs, ordered collections and the raw response cache.
//!
//! Nothing in this crate performs network I/O. Service wrappers in the
//! `postnl` crate drive the pipeline; this crate only supplies the pieces.
#![warn(unreachable_pub)]

pub mod cache;
pub mod collection;
pub mod entity;
pub mod fingerprint;
pub mod model;
pub mod path;
pub mod registry;
pub mod serialize;
pub mod validate;
pub mod value;

#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Maximum entity nesting depth accepted when decoding a wire payload.
///
/// Carrier payloads nest three or four levels deep; anything beyond this is
/// treated as a malformed response rather than recursed into.
pub const MAX_NESTING_DEPTH: usize = 32;

///
/// Prelude
///
/// Domain vocabulary only. Errors and codecs stay behind their modules.
///

pub mod prelude {
    pub use crate::{
        collection::{CollectionKey, OrderedCollection},
        entity::Entity,
        model::{
            Direction, ServiceId,
            entity::{EntityDecl, EntityModel},
            field::{FieldKind, FieldModel, PrimitiveKind},
        },
        registry::Registry,
        serialize::{WireFormat, WireValue},
        value::Value,
    };
}
