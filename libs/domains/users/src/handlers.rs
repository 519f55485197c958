use axum::{Router, extract::State, routing::get};
use axum_helpers::{
    ApiResponse, EmptyContent, EnvelopeJson, EnvelopeQuery, PagedContent, UuidPath,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    method_not_allowed,
};
use std::sync::Arc;
use tracing::{Span, info, warn};
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserQuery, UserRequest};
use crate::service::UserService;
use crate::validator::UserValidator;

const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user, find_all_users, find_user_by_id, update_user, delete_user),
    components(
        schemas(User, UserRequest),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
struct UsersState {
    service: Arc<dyn UserService>,
    validator: Arc<dyn UserValidator>,
    span: Span,
}

/// Routes for `/users`, meant to be nested under the API prefix.
///
/// Unsupported methods on these paths answer with the 405 envelope.
pub fn router<S, V>(service: S, validator: V, span: Span) -> Router
where
    S: UserService + 'static,
    V: UserValidator + 'static,
{
    let state = UsersState {
        service: Arc::new(service),
        validator: Arc::new(validator),
        span,
    };

    Router::new()
        .route("/", get(find_all_users).post(create_user))
        .route(
            "/{id}",
            get(find_user_by_id).put(update_user).delete(delete_user),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

fn log_failure<T>(span: &Span, action: &str, result: UserResult<T>) -> UserResult<T> {
    if let Err(e) = &result {
        warn!(parent: span, error = %e, "Error while {}", action);
    }
    result
}

/// Create a user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created successfully", body = ApiResponse<User>),
        (status = 400, description = "Invalid body, duplicate user or non-unique values", body = ApiResponse<User>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user(
    State(state): State<UsersState>,
    EnvelopeJson(input): EnvelopeJson<UserRequest>,
) -> UserResult<ApiResponse<User>> {
    info!(parent: &state.span, "Create user");

    state
        .validator
        .validate_user(&input)
        .map_err(UserError::InvalidBody)?;

    log_failure(&state.span, "creating user", state.service.create_user(input).await)
}

/// List users, optionally filtered by username substring or exact email
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(UserQuery),
    responses(
        (status = 200, description = "Users found successfully", body = ApiResponse<PagedContent<User>>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, description = "No users found", body = ApiResponse<EmptyContent>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_all_users(
    State(state): State<UsersState>,
    EnvelopeQuery(query): EnvelopeQuery<UserQuery>,
) -> UserResult<ApiResponse<PagedContent<User>>> {
    info!(parent: &state.span, "Find all users");

    state
        .validator
        .validate_query(&query)
        .map_err(UserError::InvalidQuery)?;

    log_failure(&state.span, "finding all users", state.service.find_all_users(query).await)
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = ApiResponse<User>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn find_user_by_id(
    State(state): State<UsersState>,
    UuidPath(id): UuidPath,
) -> UserResult<ApiResponse<User>> {
    info!(parent: &state.span, "Find user by id");

    log_failure(&state.span, "finding user by id", state.service.find_user_by_id(id).await)
}

/// Update a user; empty fields keep their stored value
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<User>),
        (status = 400, description = "Invalid id or body, values held by another user", body = ApiResponse<User>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user(
    State(state): State<UsersState>,
    UuidPath(id): UuidPath,
    EnvelopeJson(input): EnvelopeJson<UserRequest>,
) -> UserResult<ApiResponse<User>> {
    info!(parent: &state.span, "Update user by id");

    state
        .validator
        .validate_user(&input)
        .map_err(UserError::InvalidBody)?;

    log_failure(&state.span, "updating user by id", state.service.update_user(id, input).await)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = ApiResponse<EmptyContent>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user(
    State(state): State<UsersState>,
    UuidPath(id): UuidPath,
) -> UserResult<ApiResponse<EmptyContent>> {
    info!(parent: &state.span, "Delete user by id");

    log_failure(&state.span, "deleting user by id", state.service.delete_user(id).await)
}
