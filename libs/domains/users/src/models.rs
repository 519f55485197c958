use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// A stored user. Every field except `id` is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Server-generated, never changes
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: String,
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// Missing fields deserialize as empty strings so the validator, not the JSON
/// parser, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserRequest {
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[schema(example = "5550100")]
    pub phone: String,
}

impl UserRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Filters for `GET /users`. Empty values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Case-insensitive substring of the username
    pub username: Option<String>,
    /// Exact email address
    pub email: Option<String>,
}

impl UserQuery {
    pub fn username_filter(&self) -> Option<&str> {
        self.username.as_deref().filter(|s| !s.is_empty())
    }

    pub fn email_filter(&self) -> Option<&str> {
        self.email.as_deref().filter(|s| !s.is_empty())
    }
}
