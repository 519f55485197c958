//! The `{code, message, content}` body returned by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::messages;

/// Uniform response envelope.
///
/// `code` mirrors the HTTP status the envelope is sent with; [`IntoResponse`]
/// derives the status from it, so a handler never sets the status separately.
///
/// ```json
/// { "code": 404, "message": "User not found.", "content": {} }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Application status code, equal to the HTTP status
    pub code: u16,
    /// Human-readable outcome
    pub message: String,
    /// Payload: `{}`, a single record or a [`PagedContent`]
    pub content: T,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmptyContent {}

/// List payload. Cursors are reserved and always `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PagedContent<T> {
    pub count: usize,
    #[serde(rename = "prev")]
    pub previous: Option<String>,
    pub next: Option<String>,
    pub results: Vec<T>,
}

impl<T> PagedContent<T> {
    pub fn from_results(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            previous: None,
            next: None,
            results,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, content: T) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            content,
        }
    }

    /// 200 envelope carrying `content`.
    pub fn ok(message: impl Into<String>, content: T) -> Self {
        Self::new(StatusCode::OK, message, content)
    }
}

impl ApiResponse<EmptyContent> {
    /// Envelope with an empty `content` object, used for every failure without a payload.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, EmptyContent {})
    }

    pub fn internal_server_error() -> Self {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            messages::INTERNAL_SERVER_ERROR,
        )
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match StatusCode::from_u16(self.code) {
            Ok(status) if (100..600).contains(&self.code) => (status, Json(self)).into_response(),
            _ => {
                tracing::error!(
                    code = self.code,
                    "Invalid status code for HTTP response"
                );
                ApiResponse::internal_server_error().into_response()
            }
        }
    }
}
