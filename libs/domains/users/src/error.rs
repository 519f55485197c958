use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::ApiResponse;
use axum_helpers::errors::messages;
use thiserror::Error;

use crate::models::User;
use crate::validator::ValidationError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("User with the same username, email or phone already exists")]
    AlreadyExists(User),

    #[error("Another user already holds one of these values")]
    ValuesAlreadyExist(User),

    #[error("Unique constraint violated")]
    NonUniqueValues,

    #[error("No users matched")]
    NoUsersFound,

    #[error("Invalid request body: {0}")]
    InvalidBody(ValidationError),

    #[error("Invalid query params: {0}")]
    InvalidQuery(ValidationError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::NotFound | UserError::NoUsersFound => StatusCode::NOT_FOUND,
            UserError::AlreadyExists(_)
            | UserError::ValuesAlreadyExist(_)
            | UserError::NonUniqueValues
            | UserError::InvalidBody(_)
            | UserError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            UserError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent in the envelope. Never includes driver or parser detail.
    pub fn client_message(&self) -> &'static str {
        match self {
            UserError::NotFound => "User not found.",
            UserError::AlreadyExists(_) => "Bad request, user already exists",
            UserError::ValuesAlreadyExist(_) => "Bad request, values already exists",
            UserError::NonUniqueValues => "Bad request, non-unique values",
            UserError::NoUsersFound => "No users found",
            UserError::InvalidBody(_) => messages::INVALID_REQUEST_BODY,
            UserError::InvalidQuery(_) => messages::INVALID_QUERY_PARAMS,
            UserError::Database(_) => messages::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.client_message();

        match self {
            UserError::AlreadyExists(user) | UserError::ValuesAlreadyExist(user) => {
                ApiResponse::new(status, message, user).into_response()
            }
            _ => ApiResponse::error(status, message).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use uuid::Uuid;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_carries_conflicting_user() {
        let user = User {
            id: Uuid::nil(),
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            phone: "5550100".to_string(),
        };

        let response = UserError::AlreadyExists(user).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "code": 400,
                "message": "Bad request, user already exists",
                "content": {
                    "id": "00000000-0000-0000-0000-000000000000",
                    "username": "jdoe",
                    "email": "jdoe@example.com",
                    "phone": "5550100"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let response =
            UserError::Database("relation \"users\" does not exist".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"code": 500, "message": "Internal Server Error", "content": {}})
        );
    }

    #[test]
    fn test_status_and_message_table() {
        let cases = [
            (UserError::NotFound, 404, "User not found."),
            (UserError::NoUsersFound, 404, "No users found"),
            (UserError::NonUniqueValues, 400, "Bad request, non-unique values"),
            (
                UserError::InvalidBody(ValidationError::EmailEmpty),
                400,
                "Bad request, invalid request body",
            ),
            (
                UserError::InvalidQuery(ValidationError::EmailInvalid),
                400,
                "Bad request, invalid query params",
            ),
        ];

        for (error, code, message) in cases {
            assert_eq!(error.status().as_u16(), code);
            assert_eq!(error.client_message(), message);
        }
    }
}
