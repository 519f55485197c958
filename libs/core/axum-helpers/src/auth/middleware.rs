use super::config::ApiKeyConfig;
use crate::envelope::ApiResponse;
use crate::errors::messages;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

const AUTH_SCHEME: &str = "Bearer";

/// Extract the key from `Authorization: Bearer <key>` (scheme is case-insensitive).
fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.split_once(' ')?;

    (scheme.eq_ignore_ascii_case(AUTH_SCHEME) && !key.is_empty()).then_some(key)
}

/// Rejects the request with a 401 envelope unless it carries the configured API key.
pub async fn api_key_middleware(
    State(config): State<ApiKeyConfig>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    match extract_api_key(&headers) {
        Some(key) if config.verify(key) => next.run(request).await,
        Some(_) => {
            tracing::debug!("API key rejected");
            unauthorized()
        }
        None => {
            tracing::debug!("No API key found in Authorization header");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    ApiResponse::error(StatusCode::UNAUTHORIZED, messages::INVALID_AUTH_TOKEN).into_response()
}
