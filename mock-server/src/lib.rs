use std::{collections::BTreeMap, time::Duration};

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Longest delay `/delay/{secs}` will honor.
pub const MAX_DELAY_SECS: u64 = 10;

/// Largest body `/bytes/{n}` will produce.
pub const MAX_BYTES: usize = 64 * 1024 * 1024;

/// Fixed payload served by `/binary`; not valid UTF-8.
pub const BINARY_PAYLOAD: &[u8] = &[0x89, b'P', b'N', b'G', 0xff, 0xfe];

/// What the server saw of a request.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub args: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResult {
    pub authenticated: bool,
    pub user: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/get", get(echo_get))
        .route("/post", post(echo_post))
        .route("/status/{code}", any(status))
        .route("/delay/{secs}", any(delay))
        .route("/basic-auth/{user}/{password}", any(basic_auth))
        .route("/bytes/{n}", get(bytes))
        .route("/binary", get(binary))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo_get(Query(args): Query<BTreeMap<String, String>>, headers: HeaderMap) -> Json<Echo> {
    Json(Echo {
        method: "GET".to_string(),
        args,
        headers: header_map(&headers),
        body: String::new(),
    })
}

async fn echo_post(
    Query(args): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    Json(Echo {
        method: "POST".to_string(),
        args,
        headers: header_map(&headers),
        body,
    })
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn delay(Path(secs): Path<u64>) -> StatusCode {
    tokio::time::sleep(Duration::from_secs(secs.min(MAX_DELAY_SECS))).await;
    StatusCode::OK
}

async fn bytes(Path(n): Path<usize>) -> Vec<u8> {
    vec![b'a'; n.min(MAX_BYTES)]
}

async fn binary() -> &'static [u8] {
    BINARY_PAYLOAD
}

async fn basic_auth(
    Path((user, password)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<AuthResult>, StatusCode> {
    let expected = format!("Basic {}", STANDARD.encode(format!("{user}:{password}")));
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if presented != expected {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(AuthResult {
        authenticated: true,
        user,
    }))
}

/// Header names as received (lowercase); repeated headers are joined with `", "`.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match out.get_mut(name.as_str()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => {
                out.insert(name.as_str().to_string(), value);
            }
        }
    }
    out
}
