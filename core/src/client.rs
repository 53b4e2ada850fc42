//! Blocking request executor.
//!
//! # Design
//! A call is split in three steps. `build_request` resolves a `RequestConfig`
//! into an `HttpRequest` without touching the network, the `Transport`
//! performs it, and `classify` folds the transport outcome into a
//! `RequestResponse`. Only the middle step does I/O, so the other two are
//! covered by plain unit tests.
//!
//! `Client` holds nothing but its transport. Calls share no mutable state
//! and may run concurrently from several threads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::{BasicAuthentication, RequestConfig, RequestResponse};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Executes GET and POST requests through a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct Client<T = UreqTransport> {
    transport: T,
}

impl Client {
    /// Client using the default `ureq` transport.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET a URL or a full `RequestConfig`.
    pub fn get(&self, config: impl Into<RequestConfig>) -> RequestResponse {
        self.execute(HttpMethod::Get, &config.into())
    }

    /// POST a URL or a full `RequestConfig`. Parameters are sent both in the
    /// query string and as the form-encoded body.
    pub fn post(&self, config: impl Into<RequestConfig>) -> RequestResponse {
        self.execute(HttpMethod::Post, &config.into())
    }

    pub fn execute(&self, method: HttpMethod, config: &RequestConfig) -> RequestResponse {
        let request = build_request(method, config);
        debug!(
            method = method.as_str(),
            url = %request.url,
            headers = request.headers.len(),
            timeout_secs = request.timeout.as_secs(),
            "dispatching request"
        );

        let outcome = self.transport.perform(&request);
        match &outcome {
            Ok(response) => debug!(status = response.status, "request completed"),
            Err(e) => warn!(error = %e, url = %request.url, "request failed"),
        }
        classify(outcome)
    }
}

/// Resolve `config` into the call the transport will perform.
pub fn build_request(method: HttpMethod, config: &RequestConfig) -> HttpRequest {
    let url = format!("{}{}", config.url, config.params.encode());

    let mut headers = config.headers.lines();
    if method == HttpMethod::Post && !config.headers.contains_ignore_case("content-type") {
        headers.push(format!("Content-Type: {FORM_CONTENT_TYPE}"));
    }
    if let Some(line) = authorization_line(&config.auth) {
        headers.push(line);
    }

    let body = match method {
        HttpMethod::Get => None,
        HttpMethod::Post => Some(config.params.encoded_pairs().to_string()),
    };

    HttpRequest {
        method,
        url,
        headers,
        body,
        timeout: config.timeout,
    }
}

/// `Authorization` header line for enabled credentials.
pub fn authorization_line(auth: &BasicAuthentication) -> Option<String> {
    if !auth.is_enabled() {
        return None;
    }
    let token = STANDARD.encode(format!("{}:{}", auth.username, auth.password));
    Some(format!("Authorization: Basic {token}"))
}

/// Map a transport outcome to its terminal `RequestResponse`.
pub fn classify(outcome: Result<HttpResponse, TransportError>) -> RequestResponse {
    match outcome {
        Ok(response) => RequestResponse::completed(response.status, &response.body),
        Err(TransportError::Timeout) => RequestResponse::timed_out(),
        Err(TransportError::Failed(reason)) => RequestResponse::failed(reason),
    }
}
