//! Shared failure responses: message constants, route fallbacks and OpenAPI docs.

pub mod handlers;
pub mod messages;
pub mod responses;

pub use handlers::{method_not_allowed, panic_response};
