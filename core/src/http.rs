//! Wire-level request/response data and the transport seam.
//!
//! # Design
//! The executor resolves a `RequestConfig` into an `HttpRequest` (final URL,
//! header lines, optional body, timeout) and hands it to a `Transport`. The
//! transport owns all socket work and returns either the raw status and body
//! or a `TransportError`. Keeping the request as plain data makes the
//! resolution step testable without a network.

use std::time::Duration;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// One fully resolved HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// `"key: value"` lines, in the order they are sent.
    pub headers: Vec<String>,
    /// `Some("")` is an explicitly empty body, distinct from `None`.
    pub body: Option<String>,
    /// Zero disables the timeout.
    pub timeout: Duration,
}

/// Raw outcome of a completed call, whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Payload bytes exactly as received.
    pub body: Vec<u8>,
}

/// Performs one HTTP call.
///
/// Implementations must tolerate concurrent calls from independent threads,
/// each with its own session, and release every per-call resource before
/// returning.
pub trait Transport: Send + Sync {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).perform(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).perform(request)
    }
}
