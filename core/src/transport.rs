//! Default `Transport` backed by `ureq`.
//!
//! # Design
//! Every call builds its own `ureq::Agent` and drops it before returning, so
//! no connection state is shared between calls or threads. Status-code errors
//! are disabled: a 4xx/5xx reply is returned as data. The body is read in
//! full as raw bytes, with no size cap.

use std::io;

use tracing::trace;
use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Blocking transport using one `ureq` agent per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(request: &HttpRequest) -> Agent {
        let timeout = (!request.timeout.is_zero()).then_some(request.timeout);
        Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = Self::agent(request);
        let headers: Vec<(&str, &str)> =
            request.headers.iter().filter_map(|line| split_line(line)).collect();

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = agent.get(request.url.as_str());
                for &(name, value) in &headers {
                    builder = builder.header(name, value);
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = agent.post(request.url.as_str());
                for &(name, value) in &headers {
                    builder = builder.header(name, value);
                }
                match request.body.as_deref() {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(map_error)?;
        trace!(status, bytes = body.len(), "response read");

        Ok(HttpResponse { status, body })
    }
}

/// Split a `"key: value"` line. Lines without a colon are skipped.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    Some((name.trim(), value.trim()))
}

fn map_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(e) if is_timeout(&e) => TransportError::Timeout,
        other => TransportError::Failed(other.to_string()),
    }
}

fn is_timeout(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::TimedOut
}
