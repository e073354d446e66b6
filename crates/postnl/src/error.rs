use crate::{
    config::ConfigError,
    http::{HttpParseError, StatusCode, TransportError},
    soap::SoapError,
};
use derive_more::Display;
use postnl_core::{
    collection::CollectionError,
    registry::RegistryError,
    serialize::SerializeError,
    validate::ValidateError,
    value::CoercionError,
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// Non-success status returned by the carrier.
    pub(crate) fn status(status: StatusCode, body: &[u8]) -> Self {
        const SNIPPET: usize = 200;

        let text = String::from_utf8_lossy(body);
        let snippet: String = text.chars().take(SNIPPET).collect();

        Self::new(
            ErrorKind::Api,
            ErrorOrigin::Response,
            format!("carrier returned status {}: {snippet}", status.as_u16()),
        )
    }

    /// A decoded carrier answer lacks a property the carrier must send.
    pub(crate) fn incomplete_response(err: &ValidateError) -> Self {
        Self::new(
            ErrorKind::Api,
            ErrorOrigin::Response,
            format!("incomplete carrier response: {err}"),
        )
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        Self::new(ErrorKind::Validation, ErrorOrigin::Entity, err.to_string())
    }
}

impl From<CoercionError> for Error {
    fn from(err: CoercionError) -> Self {
        Self::new(ErrorKind::Coercion, ErrorOrigin::Entity, err.to_string())
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownType(_) => {
                Self::new(ErrorKind::UnknownType, ErrorOrigin::Registry, err.to_string())
            }
            RegistryError::ConflictingRule { .. } | RegistryError::DuplicateField { .. } => {
                Self::new(ErrorKind::Internal, ErrorOrigin::Registry, err.to_string())
            }
        }
    }
}

impl From<SerializeError> for Error {
    fn from(err: SerializeError) -> Self {
        match err {
            SerializeError::Registry(err) => err.into(),
            _ => Self::new(
                ErrorKind::Serialization,
                ErrorOrigin::Serialize,
                err.to_string(),
            ),
        }
    }
}

impl From<CollectionError> for Error {
    fn from(err: CollectionError) -> Self {
        Self::new(ErrorKind::Collection, ErrorOrigin::Entity, err.to_string())
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Self::new(ErrorKind::Transport, ErrorOrigin::Transport, err.to_string())
    }
}

impl From<HttpParseError> for Error {
    fn from(err: HttpParseError) -> Self {
        Self::new(
            ErrorKind::Serialization,
            ErrorOrigin::Response,
            err.to_string(),
        )
    }
}

impl From<SoapError> for Error {
    fn from(err: SoapError) -> Self {
        match err {
            SoapError::Fault { .. } => {
                Self::new(ErrorKind::Api, ErrorOrigin::Response, err.to_string())
            }
            SoapError::Serialize(err) => err.into(),
            SoapError::MissingBody | SoapError::NotAnEnvelope(_) => Self::new(
                ErrorKind::Serialization,
                ErrorOrigin::Response,
                err.to_string(),
            ),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorKind {
    /// The carrier answered with an error status or a fault.
    Api,
    /// A value could not be coerced into a property's declared kind.
    Coercion,
    Collection,
    Config,
    /// The caller cannot remediate this.
    Internal,
    /// A payload could not be encoded or decoded.
    Serialization,
    Transport,
    UnknownType,
    /// A required property is missing; nothing was sent.
    Validation,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorOrigin {
    Config,
    Entity,
    Registry,
    Response,
    Serialize,
    Transport,
}
