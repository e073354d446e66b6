//! Client configuration, loaded from TOML.
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::LazyLock};
use thiserror::Error as ThisError;
use url::Url;

static LIVE_REST: LazyLock<BaseUrl> = LazyLock::new(|| known("https://api.postnl.nl"));
static SANDBOX_REST: LazyLock<BaseUrl> = LazyLock::new(|| known("https://api-sandbox.postnl.nl"));
static LIVE_SOAP: LazyLock<BaseUrl> = LazyLock::new(|| known("https://service.postnl.com/CIF"));
static SANDBOX_SOAP: LazyLock<BaseUrl> =
    LazyLock::new(|| known("https://testservice.postnl.com/CIF_SB"));

fn known(raw: &str) -> BaseUrl {
    BaseUrl::parse(raw).expect("carrier host constant is a valid base url")
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to read config at '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("api_key must not be empty")]
    MissingApiKey,

    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

///
/// ApiMode
///
/// Which wire family delivery-date calls use.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    #[default]
    Rest,
    Soap,
}

///
/// BaseUrl
///
/// An absolute `http`/`https` URL with a host and no query or fragment.
/// Endpoint paths are appended as segments.
///

#[derive(Clone, Debug, Deref, Display, Eq, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |why: &str| ConfigError::Invalid(format!("endpoint '{raw}' {why}"));

        let url = Url::parse(raw).map_err(|err| invalid(&format!("is not a url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("is not an http(s) url"));
        }
        if url.host_str().is_none_or(str::is_empty) || url.cannot_be_a_base() {
            return Err(invalid("has no host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment"));
        }

        Ok(Self(url))
    }

    /// `path` appended below the base, with `query` form-encoded.
    #[must_use]
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        url
    }
}

impl TryFrom<String> for BaseUrl {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<BaseUrl> for String {
    fn from(url: BaseUrl) -> Self {
        url.0.into()
    }
}

///
/// Endpoints
///
/// Base URL overrides. Unset entries fall back to the live or sandbox host.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoints {
    pub rest: Option<BaseUrl>,
    pub soap: Option<BaseUrl>,
}

///
/// ClientConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub api_key: String,

    #[serde(default)]
    pub sandbox: bool,

    #[serde(default)]
    pub mode: ApiMode,

    #[serde(default)]
    pub customer_code: Option<String>,

    #[serde(default)]
    pub customer_number: Option<String>,

    #[serde(default)]
    pub endpoints: Endpoints,
}

impl ClientConfig {
    /// Minimal REST configuration against the live host.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sandbox: false,
            mode: ApiMode::Rest,
            customer_code: None,
            customer_number: None,
            endpoints: Endpoints::default(),
        }
    }

    #[must_use]
    pub const fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ApiMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_customer(mut self, code: impl Into<String>, number: impl Into<String>) -> Self {
        self.customer_code = Some(code.into());
        self.customer_number = Some(number.into());
        self
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Endpoint overrides are checked when parsed; only the key is left.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(())
    }

    /// Base URL for REST calls.
    #[must_use]
    pub fn rest_base(&self) -> &BaseUrl {
        let default = if self.sandbox { &SANDBOX_REST } else { &LIVE_REST };

        self.endpoints.rest.as_ref().unwrap_or(default)
    }

    /// Base URL for SOAP calls.
    #[must_use]
    pub fn soap_base(&self) -> &BaseUrl {
        let default = if self.sandbox { &SANDBOX_SOAP } else { &LIVE_SOAP };

        self.endpoints.soap.as_ref().unwrap_or(default)
    }
}
