//! Application state management.
//!
//! The state holds the configuration and the PostgreSQL pool. Domain services
//! are built from it once, when the routes are assembled.

/// Shared application state.
///
/// Cloning is cheap: the pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
