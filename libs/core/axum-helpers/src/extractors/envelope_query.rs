//! Query string extractor.

use crate::envelope::ApiResponse;
use crate::errors::messages;
use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// `axum::extract::Query` with a 400 envelope "Bad request, invalid query params" as rejection.
pub struct EnvelopeQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for EnvelopeQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Error while parsing query params");
                ApiResponse::error(StatusCode::BAD_REQUEST, messages::INVALID_QUERY_PARAMS)
                    .into_response()
            })?;

        Ok(EnvelopeQuery(value))
    }
}
