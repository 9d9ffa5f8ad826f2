//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `WALMARTCHAIN_DATA_DIR` - Directory for persisted store snapshots
//!   (default: `.walmartchain`)
//! - `WALMARTCHAIN_AI_BASE_URL` - Base URL of the generative recommendations
//!   service; when unset, recommendation features are disabled
//! - `WALMARTCHAIN_AI_API_KEY` - API key for the recommendations service
//!   (required when the base URL is set)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory the file-backed snapshot storage writes into.
    pub data_dir: PathBuf,
    /// Recommendations service configuration, when enabled.
    pub recommendations: Option<RecommendationsConfig>,
}

/// Generative recommendations service configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct RecommendationsConfig {
    /// Base URL of the service.
    pub base_url: Url,
    /// API key sent with every request.
    pub api_key: SecretString,
}

impl std::fmt::Debug for RecommendationsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationsConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the service base URL is unparseable or the
    /// API key is missing while the base URL is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("WALMARTCHAIN_DATA_DIR", ".walmartchain"));
        let recommendations = RecommendationsConfig::from_env()?;

        Ok(Self {
            data_dir,
            recommendations,
        })
    }

    /// An ephemeral configuration with no service access, for tests and
    /// in-memory sessions.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            data_dir: PathBuf::new(),
            recommendations: None,
        }
    }
}

impl RecommendationsConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(base_url) = get_optional_env("WALMARTCHAIN_AI_BASE_URL") else {
            return Ok(None);
        };

        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("WALMARTCHAIN_AI_BASE_URL".to_owned(), e.to_string())
        })?;
        let api_key = get_required_env("WALMARTCHAIN_AI_API_KEY")?;

        Ok(Some(Self {
            base_url,
            api_key: SecretString::from(api_key),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = RecommendationsConfig {
            base_url: Url::parse("https://ai.example.com/flows").unwrap(),
            api_key: SecretString::from("sk-very-secret-key"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("https://ai.example.com/flows"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk-very-secret-key"));
    }

    #[test]
    fn test_ephemeral_config_has_no_service() {
        let config = StorefrontConfig::ephemeral();
        assert!(config.recommendations.is_none());
    }
}
