//! Client-facing messages shared by every route.

pub const INVALID_REQUEST_BODY: &str = "Bad request, invalid request body";
pub const INVALID_QUERY_PARAMS: &str = "Bad request, invalid query params";
pub const INVALID_ID: &str = "Bad request, invalid id";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const INVALID_AUTH_TOKEN: &str = "Missing or invalid Auth Token";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
