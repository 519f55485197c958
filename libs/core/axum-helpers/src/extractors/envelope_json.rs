//! JSON body extractor that ignores `Content-Type`.

use crate::envelope::ApiResponse;
use crate::errors::messages;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Deserializes the request body as JSON.
///
/// Unlike `axum::Json` the content type is not checked. Unreadable or
/// malformed bodies become a 400 envelope "Bad request, invalid request body".
pub struct EnvelopeJson<T>(pub T);

impl<T, S> FromRequest<S> for EnvelopeJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "Error while reading request body");
            invalid_body()
        })?;

        serde_json::from_slice(&bytes).map(EnvelopeJson).map_err(|e| {
            tracing::warn!(error = %e, "Error while unmarshalling request body");
            invalid_body()
        })
    }
}

fn invalid_body() -> Response {
    ApiResponse::error(StatusCode::BAD_REQUEST, messages::INVALID_REQUEST_BODY).into_response()
}
