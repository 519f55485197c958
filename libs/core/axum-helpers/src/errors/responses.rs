//! Reusable OpenAPI responses for envelope failures.

use crate::envelope::{ApiResponse, EmptyContent};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Malformed id, body or query",
    content_type = "application/json",
    example = json!({"code": 400, "message": "Bad request, invalid request body", "content": {}})
)]
pub struct BadRequestResponse(pub ApiResponse<EmptyContent>);

#[derive(ToResponse)]
#[response(
    description = "Missing or wrong API key",
    content_type = "application/json",
    example = json!({"code": 401, "message": "Missing or invalid Auth Token", "content": {}})
)]
pub struct UnauthorizedResponse(pub ApiResponse<EmptyContent>);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({"code": 404, "message": "User not found.", "content": {}})
)]
pub struct NotFoundResponse(pub ApiResponse<EmptyContent>);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({"code": 500, "message": "Internal Server Error", "content": {}})
)]
pub struct InternalServerErrorResponse(pub ApiResponse<EmptyContent>);
