//! Request input extraction.
//!
//! # Responsibilities
//! - Parse the query string into `Input`
//! - Parse URL-encoded or flat JSON bodies into POST data
//! - Reject bodies that are oversized or malformed before routing
//!
//! # Design Decisions
//! - The router only ever sees the path; query and body go to `Input`
//! - Nested JSON values are kept as their JSON text

use axum::{
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::app::Input;

#[derive(Debug, Error)]
pub enum InputRejection {
    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON body must be an object")]
    NotAnObject,
}

impl IntoResponse for InputRejection {
    fn into_response(self) -> Response {
        let status = match self {
            InputRejection::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            InputRejection::Json(_) | InputRejection::NotAnObject => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

pub async fn read_input(request: Request, limit: usize) -> Result<Input, InputRejection> {
    let mut input = request
        .uri()
        .query()
        .map(Input::from_query)
        .unwrap_or_default();

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let body = axum::body::to_bytes(request.into_body(), limit)
        .await
        .map_err(|_| InputRejection::BodyTooLarge(limit))?;
    if body.is_empty() {
        return Ok(input);
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        input.extend_post_form(&body);
    } else if content_type.starts_with("application/json") {
        let serde_json::Value::Object(fields) = serde_json::from_slice(&body)? else {
            return Err(InputRejection::NotAnObject);
        };
        for (key, value) in fields {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => input.set_post(key, s),
                other => input.set_post(key, other.to_string()),
            }
        }
    }

    Ok(input)
}
