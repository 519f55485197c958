use core_config::{ConfigError, FromEnv, env_required};
use std::fmt;
use std::sync::Arc;

/// API key expected in `Authorization: Bearer <key>`.
///
/// Loaded from `API_AUTH_TOKEN`. When the variable is unset or empty the
/// service still starts, but every protected request is rejected.
#[derive(Clone, Default)]
pub struct ApiKeyConfig {
    token: Option<Arc<str>>,
}

impl ApiKeyConfig {
    pub fn new(token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self {
            token: (!token.is_empty()).then(|| Arc::from(token)),
        }
    }

    /// A config that rejects every key.
    pub fn disabled() -> Self {
        Self { token: None }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Compares `presented` with the configured token in constant time.
    pub fn verify(&self, presented: &str) -> bool {
        match &self.token {
            Some(token) => constant_time_eq(token.as_bytes(), presented.as_bytes()),
            None => false,
        }
    }
}

impl fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl FromEnv for ApiKeyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        match env_required("API_AUTH_TOKEN") {
            Ok(token) => Ok(Self::new(token)),
            Err(_) => {
                tracing::warn!("API_AUTH_TOKEN is not set; all authenticated routes will return 401");
                Ok(Self::disabled())
            }
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_matches_only_exact_token() {
        let config = ApiKeyConfig::new("s3cret");
        assert!(config.verify("s3cret"));
        assert!(!config.verify("s3cre"));
        assert!(!config.verify("s3cret!"));
        assert!(!config.verify("S3CRET"));
        assert!(!config.verify(""));
    }

    #[test]
    fn test_disabled_rejects_everything() {
        let config = ApiKeyConfig::disabled();
        assert!(!config.is_configured());
        assert!(!config.verify(""));
        assert!(!config.verify("anything"));
    }

    #[test]
    fn test_empty_token_is_treated_as_unset() {
        assert!(!ApiKeyConfig::new("").is_configured());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", ApiKeyConfig::new("s3cret"));
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_var("API_AUTH_TOKEN", Some("from-env"), || {
            let config = ApiKeyConfig::from_env().unwrap();
            assert!(config.verify("from-env"));
        });

        temp_env::with_var_unset("API_AUTH_TOKEN", || {
            let config = ApiKeyConfig::from_env().unwrap();
            assert!(!config.is_configured());
        });
    }
}
