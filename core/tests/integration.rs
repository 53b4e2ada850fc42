//! End-to-end requests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port in a background runtime, then
//! drives the blocking `Client` over real HTTP with the default `ureq`
//! transport. Covers success statuses, HTTP error statuses, parameter and
//! header delivery, basic auth, raw and large bodies, and both failure
//! classes.

use std::net::SocketAddr;
use std::time::Duration;

use easyhttp_core::{
    BasicAuthentication, Client, Headers, RequestConfig, RequestError, UrlParameters,
};
use mock_server::{AuthResult, Echo};

/// Start the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn echo(body: &str) -> Echo {
    serde_json::from_str(body).unwrap()
}

#[test]
fn get_and_post_return_200() {
    let base = format!("http://{}", start_server());
    let client = Client::new();

    let resp = client.get(format!("{base}/status/200"));
    assert_eq!(resp.error, RequestError::None);
    assert_eq!(resp.status, "200");
    assert!(resp.body.is_empty());

    let resp = client.post(format!("{base}/post"));
    assert_eq!(resp.error, RequestError::None);
    assert_eq!(resp.status, "200");
    assert_eq!(echo(&resp.body).body, "");
}

#[test]
fn http_404_is_not_an_executor_error() {
    let base = format!("http://{}", start_server());
    let client = Client::new();

    let resp = client.get(format!("{base}/doesntexist"));
    assert_eq!(resp.error, RequestError::None);
    assert_eq!(resp.status, "404");

    let resp = client.post(format!("{base}/doesntexist"));
    assert_eq!(resp.error, RequestError::None);
    assert_eq!(resp.status, "404");
}

#[test]
fn server_error_status_is_reported_verbatim() {
    let base = format!("http://{}", start_server());
    let resp = Client::new().post(format!("{base}/status/503"));
    assert_eq!(resp.error, RequestError::None);
    assert_eq!(resp.status, "503");
}

#[test]
fn get_delivers_escaped_query_parameters() {
    let base = format!("http://{}", start_server());
    let config = RequestConfig::new(format!("{base}/get"))
        .with_params(UrlParameters::from([("foo", "bar"), ("key 1", "a&b=c")]));

    let resp = Client::new().get(config);
    assert_eq!(resp.status, "200");
    let seen = echo(&resp.body);
    assert_eq!(seen.args["foo"], "bar");
    assert_eq!(seen.args["key 1"], "a&b=c");
}

#[test]
fn post_body_matches_encoded_parameters() {
    let base = format!("http://{}", start_server());
    let params = UrlParameters::from([("foo", "bar"), ("key 1", "value 1")]);
    let config = RequestConfig::new(format!("{base}/post")).with_params(params.clone());

    let resp = Client::new().post(&config);
    assert_eq!(resp.status, "200");
    let seen = echo(&resp.body);
    assert_eq!(seen.body, params.encoded_pairs());
    assert_eq!(seen.args["foo"], "bar");
    assert_eq!(seen.headers["content-type"], "application/x-www-form-urlencoded");
}

#[test]
fn custom_headers_reach_the_server() {
    let base = format!("http://{}", start_server());
    let headers = Headers::from(("key1", "value1"));

    let config = RequestConfig::new(format!("{base}/get")).with_headers(headers.clone());
    let resp = Client::new().get(config);
    assert_eq!(resp.status, "200");
    assert!(resp.body.contains("key1"));
    assert!(resp.body.contains("value1"));

    let config = RequestConfig::new(format!("{base}/post")).with_headers(headers);
    let resp = Client::new().post(config);
    assert_eq!(resp.status, "200");
    assert_eq!(echo(&resp.body).headers["key1"], "value1");
}

#[test]
fn caller_content_type_overrides_form_default() {
    let base = format!("http://{}", start_server());
    let config = RequestConfig::new(format!("{base}/post"))
        .with_headers(("Content-Type", "text/plain"))
        .with_params(("k", "v"));

    let resp = Client::new().post(config);
    assert_eq!(echo(&resp.body).headers["content-type"], "text/plain");
}

#[test]
fn basic_auth_is_sent_only_when_complete() {
    let base = format!("http://{}", start_server());
    let url = format!("{base}/basic-auth/user/passwd");
    let client = Client::new();

    let full = BasicAuthentication::new("user", "passwd");
    let resp = client.get(RequestConfig::new(&url).with_auth(full));
    assert_eq!(resp.status, "200");
    let result: AuthResult = serde_json::from_str(&resp.body).unwrap();
    assert!(result.authenticated);

    let partial = BasicAuthentication::new("user", "");
    let resp = client.get(RequestConfig::new(&url).with_auth(partial));
    assert_eq!(resp.error, RequestError::None);
    assert_eq!(resp.status, "401");
}

#[test]
fn slow_response_times_out() {
    let base = format!("http://{}", start_server());
    let client = Client::new();

    let get = RequestConfig::new(format!("{base}/delay/3")).with_timeout(Duration::from_secs(1));
    let resp = client.get(&get);
    assert_eq!(resp.error, RequestError::Timeout);
    assert_eq!(resp.status, "-1");
    assert_eq!(resp.body, "Operation timed out.");

    let resp = client.post(&get);
    assert_eq!(resp.error, RequestError::Timeout);
    assert_eq!(resp.status, "-1");
    assert_eq!(resp.body, "Operation timed out.");
}

#[test]
fn sub_second_timeout_still_applies() {
    let base = format!("http://{}", start_server());
    let config =
        RequestConfig::new(format!("{base}/delay/3")).with_timeout(Duration::from_millis(500));

    let resp = Client::new().get(config);
    assert_eq!(resp.error, RequestError::Timeout);
    assert_eq!(resp.status, "-1");
}

#[test]
fn non_utf8_body_is_a_successful_response() {
    let base = format!("http://{}", start_server());
    let resp = Client::new().get(format!("{base}/binary"));
    assert_eq!(resp.error, RequestError::None);
    assert_eq!(resp.status, "200");
    assert_eq!(resp.body, String::from_utf8_lossy(mock_server::BINARY_PAYLOAD));
}

#[test]
fn body_over_ten_mebibytes_is_read_in_full() {
    let base = format!("http://{}", start_server());
    let len = 11 * 1024 * 1024;
    let config = RequestConfig::new(format!("{base}/bytes/{len}"))
        .with_timeout(Duration::from_secs(30));

    let resp = Client::new().get(config);
    assert_eq!(resp.error, RequestError::None);
    assert_eq!(resp.status, "200");
    assert_eq!(resp.body.len(), len);
}

#[test]
fn connection_refused_is_misc_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    let resp = Client::new().get(format!("http://{addr}/get"));
    assert_eq!(resp.error, RequestError::Misc);
    assert_eq!(resp.status, "-1");
    assert!(resp.body.starts_with("Request encountered error: "));
}

#[test]
fn malformed_url_is_misc_error() {
    let resp = easyhttp_core::get("not a url");
    assert_eq!(resp.error, RequestError::Misc);
    assert_eq!(resp.status, "-1");
}

#[test]
fn concurrent_calls_are_independent() {
    let base = format!("http://{}", start_server());
    let client = Client::new();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let client = &client;
                let url = format!("{base}/get");
                let config = RequestConfig::new(url).with_params(("n", i.to_string()));
                s.spawn(move || client.get(config))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let resp = handle.join().unwrap();
            assert_eq!(resp.status, "200");
            assert_eq!(echo(&resp.body).args["n"], i.to_string());
        }
    });
}
