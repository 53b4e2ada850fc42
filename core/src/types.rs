//! Request description and normalized response types.
//!
//! # Design
//! `RequestConfig` is everything one call needs and is owned by the caller.
//! It can be built in code or deserialized from JSON; the timeout travels as
//! whole seconds under `timeout_secs`. `RequestResponse` is the single value
//! every call path returns: callers branch on `error` before reading `status`
//! or `body`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::headers::Headers;
use crate::query::UrlParameters;

/// Timeout used when the caller supplies only a URL.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Username/password pair for HTTP basic authentication.
///
/// Credentials are only sent when both fields are non-empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuthentication {
    pub username: String,
    pub password: String,
}

impl BasicAuthentication {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for BasicAuthentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthentication")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Complete description of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub url: String,
    #[serde(default)]
    pub params: UrlParameters,
    #[serde(default)]
    pub headers: Headers,
    #[serde(default)]
    pub auth: BasicAuthentication,
    #[serde(
        rename = "timeout_secs",
        with = "whole_seconds",
        default = "default_timeout"
    )]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl RequestConfig {
    /// Config for `url` with no params, headers, or auth and the default
    /// timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: UrlParameters::new(),
            headers: Headers::new(),
            auth: BasicAuthentication::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_params(mut self, params: impl Into<UrlParameters>) -> Self {
        self.params = params.into();
        self
    }

    pub fn with_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn with_auth(mut self, auth: BasicAuthentication) -> Self {
        self.auth = auth;
        self
    }

    /// Rounded up to whole seconds; a zero timeout means none.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.timeout = Duration::from_secs(secs);
        self
    }
}

impl From<&str> for RequestConfig {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for RequestConfig {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

impl From<&RequestConfig> for RequestConfig {
    fn from(config: &RequestConfig) -> Self {
        config.clone()
    }
}

mod whole_seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// How a request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestError {
    /// Completed end to end, whatever the HTTP status.
    None,
    /// The configured timeout elapsed.
    Timeout,
    /// Reserved. Socket failures are currently reported as `Misc`.
    SocketError,
    /// Any other transport failure.
    #[serde(rename = "error_misc")]
    Misc,
}

/// Body reported for a timed-out request.
pub const TIMEOUT_MESSAGE: &str = "Operation timed out.";

/// Status reported when no HTTP exchange completed.
pub const NO_STATUS: &str = "-1";

/// Normalized result of one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestResponse {
    pub error: RequestError,
    /// Decimal HTTP status, or `"-1"` when the call did not complete.
    pub status: String,
    /// Response payload, or a description of the failure.
    pub body: String,
}

impl RequestResponse {
    /// Invalid UTF-8 in `body` is replaced with U+FFFD.
    pub fn completed(status: u16, body: &[u8]) -> Self {
        Self {
            error: RequestError::None,
            status: status.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    pub fn timed_out() -> Self {
        Self {
            error: RequestError::Timeout,
            status: NO_STATUS.to_string(),
            body: TIMEOUT_MESSAGE.to_string(),
        }
    }

    pub fn failed(reason: impl fmt::Display) -> Self {
        Self {
            error: RequestError::Misc,
            status: NO_STATUS.to_string(),
            body: format!("Request encountered error: {reason}"),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error == RequestError::None
    }
}
