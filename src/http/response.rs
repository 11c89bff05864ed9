//! Response rendering.
//!
//! # Responsibilities
//! - Render the winning handler's reply (text or JSON)
//! - Map unsettled and empty resolutions to 404
//! - Map router and handler failures to 500
//! - Record dispatch metrics
//!
//! # Design Decisions
//! - The router never serializes; this is the only place replies become bytes
//! - Error details are logged, not sent to the client

use std::time::Instant;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::observability::metrics::{self, Outcome};
use crate::routing::{Reply, Resolution, RouteResult};

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Text(text) => (StatusCode::OK, text).into_response(),
            Reply::Json(value) => (StatusCode::OK, Json(value)).into_response(),
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

pub fn render(
    request_id: &str,
    method: &str,
    path: &str,
    result: RouteResult<Resolution>,
    start: Instant,
) -> Response {
    let (outcome, response) = match result {
        Ok(Resolution::Reply(reply)) => (Outcome::Reply, reply.into_response()),
        Ok(Resolution::Empty) => {
            tracing::debug!(request_id, method, path, "Request claimed without a reply");
            (Outcome::Empty, not_found())
        }
        Ok(Resolution::Unsettled) => {
            tracing::warn!(request_id, method, path, "No route settled the request");
            (Outcome::Unsettled, not_found())
        }
        Err(e) if e.is_configuration() => {
            tracing::error!(request_id, method, path, error = %e, "Route table misconfigured");
            (Outcome::ConfigError, internal_error())
        }
        Err(e) => {
            tracing::error!(request_id, method, path, error = %e, "Handler failed");
            (Outcome::HandlerError, internal_error())
        }
    };

    metrics::record_dispatch(method, outcome, start);
    response
}
