//! UUID path parameter extractor.

use crate::envelope::ApiResponse;
use crate::errors::messages;
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Extractor for a single UUID path parameter.
///
/// Anything that does not parse as a UUID is rejected with a 400 envelope
/// "Bad request, invalid id" before the handler runs.
///
/// ```ignore
/// async fn get_user(UuidPath(id): UuidPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Missing id path parameter");
                invalid_id()
            })?;

        Uuid::parse_str(&id).map(UuidPath).map_err(|e| {
            tracing::warn!(%id, error = %e, "Error while parsing uuid");
            invalid_id()
        })
    }
}

fn invalid_id() -> Response {
    ApiResponse::error(StatusCode::BAD_REQUEST, messages::INVALID_ID).into_response()
}
