//! ## Crate layout
//! - `client`: the injected-transport client and its request pipeline.
//! - `config`: TOML-backed client configuration.
//! - `entity`: declaration tables for every carrier entity type.
//! - `service`: delivery date, timeframe and barcode calls.
//! - `soap`: envelope building and fault handling for the SOAP endpoints.
//!
//! Entity metadata, validation, wire codecs, collections and the response
//! cache live in [`postnl_core`], re-exported here as `core`.

pub use postnl_core as core;

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod service;
pub mod service_id;
pub mod soap;

pub use client::Client;
pub use config::{ApiMode, ClientConfig};
pub use error::{Error, ErrorKind, ErrorOrigin};

use postnl_core::{
    entity::Entity,
    model::{Direction, ServiceId},
    registry::Registry,
};
use std::sync::LazyLock;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::new(entity::DECLARATIONS));

/// Process-wide registry over every carrier entity type.
#[must_use]
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Blank request entity of `type_id`, scoped to `service`.
pub fn request(type_id: &str, service: ServiceId) -> Result<Entity, Error> {
    Ok(Entity::new(registry(), type_id, service, Direction::Request)?)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        ApiMode, Client, ClientConfig, Error, ErrorKind,
        http::{HttpRequest, HttpResponse, Transport},
        service_id,
    };
    pub use postnl_core::prelude::*;
}
