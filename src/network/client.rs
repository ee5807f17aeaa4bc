//! HTTP client wrapper - executes requests and captures responses

use std::time::{Duration, Instant};

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::headers::canonical_key;
use crate::request::OutboundRequest;
use crate::response::CapturedResponse;

/// Create an HTTP client with the fixed request timeout
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timed out ({}s): {}", REQUEST_TIMEOUT_SECS, e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_builder() {
        format!("Invalid request: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Execute the request and capture the response.
///
/// Transport failures (timeout, DNS, refused connection, TLS) and body read
/// failures are appended to the response's error list instead of being
/// returned. The body is read fully, once.
pub async fn execute(client: &reqwest::Client, request: OutboundRequest) -> CapturedResponse {
    let start = Instant::now();
    let mut captured = CapturedResponse::new(request);

    let headers = match captured.request.headers.to_header_map() {
        Ok(headers) => headers,
        Err(e) => {
            captured.add_error(e);
            return captured;
        }
    };

    let mut req_builder = client
        .request(captured.request.method.into(), captured.request.url.as_str())
        .headers(headers);
    if let Some(body) = &captured.request.body {
        req_builder = req_builder.body(body.clone());
    }

    tracing::info!(
        url = %captured.request.url,
        method = %captured.request.method,
        "Executing request"
    );

    let resp = match req_builder.send().await {
        Ok(resp) => resp,
        Err(e) => {
            let msg = describe_transport_error(&e);
            tracing::warn!(elapsed_ms = start.elapsed().as_millis() as u64, error = %msg, "Request failed");
            captured.add_error(msg);
            return captured;
        }
    };

    captured.status = Some(resp.status().as_u16());
    captured.headers = resp
        .headers()
        .iter()
        .map(|(k, v)| {
            (
                canonical_key(k.as_str()),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect();

    match resp.bytes().await {
        Ok(bytes) => captured.body = String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => captured.add_error(format!("error reading the body: {}", e)),
    }

    tracing::info!(
        status = ?captured.status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    captured
}
