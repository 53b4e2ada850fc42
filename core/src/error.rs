//! Transport-level failures.
//!
//! # Design
//! Only two outcomes matter to the executor: the call ran out of time, or it
//! failed for any other reason. The latter keeps the transport's own error
//! text so it can be surfaced in the response body. HTTP error statuses are
//! not failures here; a 404 is a successful transport call.

use thiserror::Error;

/// Errors returned by a [`Transport`](crate::http::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection or the whole exchange exceeded the configured timeout.
    #[error("operation timed out")]
    Timeout,

    /// DNS, connect, TLS, malformed URL, or any other non-timeout failure.
    #[error("{0}")]
    Failed(String),
}
