use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};

pub const DEFAULT_BASE_PATH: &str = "/library-app/api/v1";
pub const DEFAULT_SERVER_HEADER: &str = "minand-mohan/library-app-api";
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1024;

/// Router-level HTTP settings.
///
/// Environment variables:
/// - `API_BASE_PATH` (default `/library-app/api/v1`) - prefix for all API routes
/// - `SERVER_HEADER` (default `minand-mohan/library-app-api`) - value of the `Server` response header
/// - `MAX_CONCURRENT_REQUESTS` (default 1024) - in-flight request limit across all routes
#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub base_path: String,
    pub server_header: String,
    pub max_concurrent_requests: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            server_header: DEFAULT_SERVER_HEADER.to_string(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl FromEnv for HttpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_path = env_or_default("API_BASE_PATH", DEFAULT_BASE_PATH);
        if !base_path.starts_with('/') || base_path.len() < 2 {
            return Err(ConfigError::ParseError {
                key: "API_BASE_PATH".to_string(),
                details: format!("must start with '/' and not be the root (got '{}')", base_path),
            });
        }

        let max_concurrent_requests =
            env_parse_or_default("MAX_CONCURRENT_REQUESTS", DEFAULT_MAX_CONCURRENT_REQUESTS)?;
        if max_concurrent_requests == 0 {
            return Err(ConfigError::ParseError {
                key: "MAX_CONCURRENT_REQUESTS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            server_header: env_or_default("SERVER_HEADER", DEFAULT_SERVER_HEADER),
            max_concurrent_requests,
        })
    }
}
