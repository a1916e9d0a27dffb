//! Request logging middleware.
//!
//! Emits one structured line per request before delegating (method, path,
//! client address), one for non-empty query strings, one for JSON bodies
//! of mutating requests, and one with the elapsed wall-clock time after
//! the handler returns. Logging never alters the response: body-parse and
//! body-read problems are logged and the request continues.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use http_body_util::BodyExt;
use tracing::{info, warn};

/// Log entry/exit lines for a request, buffering JSON bodies so they stay
/// replayable for downstream handlers.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    // Absent when served without connect info (e.g. in-process tests)
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    info!("{} {} {}", method, path, client);

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        info!("Query params: {}", query);
    }

    let request = if wants_body_logged(&request) {
        log_json_body(request).await
    } else {
        request
    };

    let start = Instant::now();
    let response = next.run(request).await;

    info!("Process time: {} ms", start.elapsed().as_millis());

    response
}

/// Mutating request with a declared JSON content type?
fn wants_body_logged(request: &Request) -> bool {
    matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::DELETE
    ) && request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false)
}

/// Buffer the body, log it, and rebuild the request so the handler sees
/// the complete original bytes (reading a body is one-shot).
async fn log_json_body(request: Request) -> Request {
    let (parts, body) = request.into_parts();

    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            // Never fail the request from here; hand an empty body on.
            warn!("Failed to read request body for logging: {}", e);
            return Request::from_parts(parts, Body::empty());
        }
    };

    if !bytes.is_empty() {
        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(json) => info!("Request body: {}", json),
            Err(_) => info!("Request body is not valid JSON"),
        }
    }

    Request::from_parts(parts, Body::from(bytes))
}
