//! HTTP message types and the transport seam.
//!
//! The crate never opens a connection itself. A [`Transport`] turns an
//! [`HttpRequest`] into an [`HttpResponse`]; responses are stored in the
//! cache in their HTTP/1.1 wire form so a hit replays exactly what was
//! received.
use std::fmt::Write;
use thiserror::Error as ThisError;

///
/// TransportError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,
}

///
/// Transport
///
/// Sends one request. Retries, TLS and pooling live behind this trait.
///

pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

pub use http::{Method, StatusCode};

///
/// HttpRequest
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// First header called `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

///
/// HttpParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum HttpParseError {
    #[error("response head is not terminated by an empty line")]
    Incomplete,

    #[error("invalid status line '{0}'")]
    InvalidStatus(String),

    #[error("malformed header line '{0}'")]
    MalformedHeader(String),

    #[error("response head is not valid UTF-8")]
    NotUtf8,
}

///
/// HttpResponse
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Encode as an HTTP/1.1 message: status line, headers, blank line, body.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = String::new();
        let _ = write!(head, "HTTP/1.1 {} {}\r\n", self.status.as_u16(), self.reason);
        for (name, value) in &self.headers {
            let _ = write!(head, "{name}: {value}\r\n");
        }
        head.push_str("\r\n");

        let mut out = head.into_bytes();
        out.extend_from_slice(&self.body);
        out
    }

    /// Parse an HTTP/1.1 message produced by [`HttpResponse::to_bytes`] or
    /// received verbatim from a server.
    pub fn parse(raw: &[u8]) -> Result<Self, HttpParseError> {
        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .ok_or(HttpParseError::Incomplete)?;
        let head = std::str::from_utf8(&raw[..split]).map_err(|_| HttpParseError::NotUtf8)?;
        let body = raw[split + 4..].to_vec();

        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap_or_default();
        let (status, reason) = parse_status_line(status_line)
            .ok_or_else(|| HttpParseError::InvalidStatus(status_line.to_string()))?;

        let mut headers = Vec::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| HttpParseError::MalformedHeader(line.to_string()))?;
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }

        Ok(Self {
            status,
            reason: reason.to_string(),
            headers,
            body,
        })
    }
}

fn parse_status_line(line: &str) -> Option<(StatusCode, &str)> {
    let rest = line.strip_prefix("HTTP/")?;
    let (_version, rest) = rest.split_once(' ')?;
    let (code, reason) = rest.split_once(' ').unwrap_or((rest, ""));
    if code.len() != 3 {
        return None;
    }

    let code = StatusCode::from_bytes(code.as_bytes()).ok()?;

    Some((code, reason))
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
