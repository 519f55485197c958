//! Pre-shared API key authentication.
//!
//! ```ignore
//! use axum_helpers::auth::{ApiKeyConfig, api_key_middleware};
//! use core_config::FromEnv;
//!
//! let auth = ApiKeyConfig::from_env()?;
//! let protected = Router::new()
//!     .route("/users", get(handler))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, api_key_middleware));
//! ```

pub mod config;
pub mod middleware;

pub use config::ApiKeyConfig;
pub use middleware::api_key_middleware;
