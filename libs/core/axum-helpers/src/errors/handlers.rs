use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::any::Any;

use super::messages;
use crate::envelope::ApiResponse;

/// Fallback for unmatched paths and methods.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    tracing::debug!(%method, %uri, "No route for request");
    ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, messages::METHOD_NOT_ALLOWED).into_response()
}

/// Turns a handler panic into a 500 envelope. Used with `CatchPanicLayer::custom`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "<unknown>"
    };

    tracing::error!(panic = detail, "Request handler panicked");
    ApiResponse::internal_server_error().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_method_not_allowed_status() {
        let response = method_not_allowed(Method::PATCH, Uri::from_static("/x")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_panic_response_is_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
