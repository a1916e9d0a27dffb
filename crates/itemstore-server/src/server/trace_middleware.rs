//! Request tracing middleware.
//!
//! Guarantees every request an active [`RequestId`] for the duration of
//! its processing and surfaces it to the caller via the `request_id`
//! response header. The task-local binding is dropped with the scoped
//! future, so cleanup runs on success, error, and cancellation alike.

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::logging::RequestId;

/// Header carrying the correlation identifier, inbound and outbound.
pub const REQUEST_ID_HEADER: &str = "request_id";

/// Tracing middleware configuration.
#[derive(Debug, Clone)]
pub struct TraceConfig {
    /// Adopt a client-supplied `request_id` header instead of generating
    /// a fresh identifier.
    pub adopt_client_id: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            adopt_client_id: true,
        }
    }
}

/// Establish a correlation identifier for the request, run the rest of
/// the pipeline inside its scope, and echo the id on the response.
pub async fn trace_middleware(
    State(config): State<TraceConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let provided = if config.adopt_client_id {
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
    } else {
        None
    };
    let request_id = RequestId::establish(provided);

    // Handlers can also read the id from request extensions.
    request.extensions_mut().insert(request_id.clone());

    let mut response = RequestId::scope(request_id.clone(), next.run(request)).await;

    match HeaderValue::from_str(request_id.as_str()) {
        Ok(value) => {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(error) => {
            error!(
                %error,
                request_id = %request_id,
                "failed to encode request id header"
            );
        }
    }

    response
}
