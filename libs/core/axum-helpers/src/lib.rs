//! # Axum Helpers
//!
//! Building blocks shared by the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{code, message, content}` response body
//! - **[`extractors`]**: UUID path, JSON body and query extractors that reject with envelopes
//! - **[`auth`]**: pre-shared API key middleware
//! - **[`errors`]**: shared messages, 405 fallback, panic handler, OpenAPI responses
//! - **[`http`]**: security headers
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{HttpConfig, create_production_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! let router = create_router::<ApiDoc>(api_routes, &HttpConfig::default())?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{ApiKeyConfig, api_key_middleware};
pub use envelope::{ApiResponse, EmptyContent, PagedContent};
pub use errors::{method_not_allowed, panic_response};
pub use extractors::{EnvelopeJson, EnvelopeQuery, UuidPath};
pub use http::security_headers;
pub use server::{
    HealthCheckFuture, HealthResponse, HttpConfig, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};
