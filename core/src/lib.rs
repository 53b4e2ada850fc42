//! Small blocking HTTP request library.
//!
//! # Overview
//! Describe a request with a [`RequestConfig`] (URL, query parameters,
//! headers, basic auth, timeout) and run it with [`Client::get`] or
//! [`Client::post`]. Every call returns a [`RequestResponse`]; transport
//! failures never surface as `Err` or panics.
//!
//! ```no_run
//! use easyhttp_core::{Client, RequestConfig, RequestError};
//!
//! let client = Client::new();
//! let config = RequestConfig::new("http://localhost:3000/get").with_params(("q", "rust lang"));
//! let resp = client.get(config);
//! if resp.error == RequestError::None {
//!     println!("{}: {}", resp.status, resp.body);
//! }
//! ```
//!
//! # Design
//! - `ParameterSet` is the shared sorted key/value store; `UrlParameters` and
//!   `Headers` wrap it and add their own encodings.
//! - HTTP error statuses are ordinary responses. Only transport failures
//!   (timeout, anything else) set `RequestResponse::error`.
//! - The network sits behind the [`Transport`] trait. [`UreqTransport`] is
//!   the default and needs no process-wide setup.

pub mod client;
pub mod error;
pub mod headers;
pub mod http;
pub mod params;
pub mod query;
pub mod transport;
pub mod types;

pub use client::{build_request, classify, Client};
pub use error::TransportError;
pub use headers::Headers;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use params::ParameterSet;
pub use query::UrlParameters;
pub use transport::UreqTransport;
pub use types::{BasicAuthentication, RequestConfig, RequestError, RequestResponse};

/// GET `config` with a default [`Client`].
pub fn get(config: impl Into<RequestConfig>) -> RequestResponse {
    Client::new().get(config)
}

/// POST `config` with a default [`Client`].
pub fn post(config: impl Into<RequestConfig>) -> RequestResponse {
    Client::new().post(config)
}
