//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::{
        HeaderMap, Method, StatusCode, Uri,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::Error;

/// The maximum number of bytes of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body in bytes that the server will read.
pub const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// The JSON fields whose values are never written to the logs.
const REDACTED_FIELDS: [&str; 7] = [
    "password",
    "current_password",
    "new_password",
    "confirm_password",
    "card_number",
    "cvv",
    "token",
];

const REDACTED: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level with any
/// sensitive JSON fields redacted.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level.
/// Request bodies over [REQUEST_BODY_LIMIT] bytes are rejected with
/// [Error::PayloadTooLarge]. Responses that are not JSON, such as static
/// files, are passed through without buffering and only their status is logged.
/// Headers are not logged so that bearer tokens stay out of the logs.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    if declared_length(&parts.headers).is_some_and(|length| length > REQUEST_BODY_LIMIT) {
        tracing::warn!("Rejected request: {} {} body is too large", parts.method, parts.uri);
        return Error::PayloadTooLarge.into_response();
    }

    let body_bytes = match to_bytes(body, REQUEST_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!("Could not read request body: {error}");
            return Error::PayloadTooLarge.into_response();
        }
    };

    log_request(&parts.method, &parts.uri, &redact_body(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    if !is_json(response.headers()) {
        tracing::info!("Sending response: {}", response.status());
        return response;
    }

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_response(parts.status, &redact_body(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/json"))
}

/// The body as text with the values of sensitive JSON fields replaced.
///
/// Bodies that are not JSON are returned as is.
fn redact_body(body: &Bytes) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(mut json) => {
            redact_json(&mut json);
            json.to_string()
        }
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn redact_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                if REDACTED_FIELDS.contains(&key.as_str()) {
                    *value = Value::String(REDACTED.to_owned());
                } else {
                    redact_json(value);
                }
            }
        }
        Value::Array(values) => values.iter_mut().for_each(redact_json),
        _ => {}
    }
}

/// The longest prefix of `text` that fits in `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(method: &Method, uri: &Uri, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {method} {uri}\nbody: {}...",
            truncate(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body}");
    } else {
        tracing::info!("Received request: {method} {uri}\nbody: {body}");
    }
}

fn log_response(status: StatusCode, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {status}\nbody: {}...",
            truncate(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body}");
    } else {
        tracing::info!("Sending response: {status}\nbody: {body}");
    }
}


#[cfg(test)]
mod middleware_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils::get_test_server;

    use super::REQUEST_BODY_LIMIT;

    #[tokio::test]
    async fn request_body_reaches_handler() {
        let server = get_test_server();

        server
            .post("/api/auth/signup")
            .json(&json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "a long enough password to be truncated in the logs",
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn oversized_request_body_is_rejected() {
        let server = get_test_server();
        let name = "a".repeat(REQUEST_BODY_LIMIT);

        let response = server
            .post("/api/auth/signup")
            .json(&json!({
                "name": name,
                "email": "alice@example.com",
                "password": "hunter2",
            }))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        response.assert_json(&json!({ "message": "The request body is too large." }));
    }

    #[tokio::test]
    async fn body_at_limit_is_accepted() {
        let server = get_test_server();
        let padding = "a".repeat(REQUEST_BODY_LIMIT - 200);

        server
            .post("/api/auth/signup")
            .json(&json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "hunter2",
                "padding": padding,
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }
}
