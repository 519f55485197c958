use axum_helpers::{ApiKeyConfig, HttpConfig};
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

// Import database configs from the database library
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub auth: ApiKeyConfig,
    pub http: HttpConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let auth = ApiKeyConfig::from_env()?; // Unset means every API call is rejected
        let http = HttpConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
            auth,
            http,
        })
    }
}
