//! Runtime metadata model.
//!
//! Entity types are described by static declaration tables (`EntityDecl`)
//! written once per type. The registry turns a declaration into an
//! `EntityModel` on first use; every validation and serialization pass reads
//! the model and never the declaration directly.
//!
//! In general:
//! - declarations define *what exists*
//! - models define *what runs*
pub mod entity;
pub mod field;

use derive_more::Display;

///
/// ServiceId
///
/// Identifier of one remote operation family. Which properties are required
/// or optional is always decided per service.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}")]
pub struct ServiceId(&'static str);

impl ServiceId {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

///
/// Direction
///
/// Whether an entity travels as an outbound request or an inbound response.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Direction {
    Request,
    Response,
}
