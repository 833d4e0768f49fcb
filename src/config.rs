//! Application configuration loaded from environment variables.
//!
//! All configuration is read once at startup and held read-only for the
//! process lifetime. In production, configure via environment variables or a
//! `.env` file.
//!
//! # Security Configuration
//!
//! - `APP_API_KEY`: Shared secret expected in the `X-API-Key` header on every
//!   API route except health. The default is a development placeholder and
//!   must be overridden in any real deployment.
//! - `CORS_ALLOWED_ORIGINS`: Comma-separated list of allowed origins, `*` for any
//!   (default: unset, CORS disabled). When enabled, every `OPTIONS` request is
//!   answered as a preflight and no longer reaches the echo endpoint.
//!
//! # Limits
//!
//! - `MAX_REQUEST_BODY_SIZE`: Maximum accepted request body in bytes (default: 1MB)

use std::env;

use crate::error::{AppError, AppResult};

/// Development placeholder for the shared secret.
pub const DEFAULT_API_KEY: &str = "devkey123";

/// Version reported by the health endpoint when `APP_VERSION` is unset.
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Application configuration loaded from environment variables.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 8000)
    pub port: u16,

    /// Application version reported by the health endpoint (default: "1.0.0")
    pub app_version: String,

    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_body_size: usize,

    // =========================================================================
    // Security Configuration
    // =========================================================================
    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: String,

    /// Allowed CORS origins; empty disables the CORS layer
    /// Use "*" to allow all origins (not recommended for production)
    pub cors_allowed_origins: Vec<String>,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    /// Log level (e.g., "info", "debug", "trace")
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if any configuration is invalid
    /// (e.g., non-numeric PORT value, empty API key).
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_env("PORT", 8000)?,
            app_version: env::var("APP_VERSION")
                .unwrap_or_else(|_| DEFAULT_APP_VERSION.to_string()),
            max_request_body_size: Self::parse_env("MAX_REQUEST_BODY_SIZE", 1024 * 1024)?,

            api_key: env::var("APP_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
            cors_allowed_origins: Self::parse_cors_origins(),

            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_json: env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if validation fails.
    fn validate(&self) -> AppResult<()> {
        if self.api_key.is_empty() {
            return Err(AppError::ConfigError(
                "APP_API_KEY must not be empty".to_string(),
            ));
        }

        if self.max_request_body_size == 0 {
            return Err(AppError::ConfigError(
                "MAX_REQUEST_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if the CORS layer should be installed.
    pub fn cors_enabled(&self) -> bool {
        !self.cors_allowed_origins.is_empty()
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check whether the development placeholder secret is still in use.
    pub fn uses_default_api_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) => val
                .parse()
                .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}"))),
            Err(_) => Ok(default),
        }
    }

    /// Parse CORS allowed origins from environment variable.
    fn parse_cors_origins() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            app_version: DEFAULT_APP_VERSION.to_string(),
            max_request_body_size: 1024 * 1024, // 1MB
            api_key: DEFAULT_API_KEY.to_string(),
            cors_allowed_origins: vec![],
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.app_version, "1.0.0");
        assert_eq!(config.api_key, "devkey123");
        assert_eq!(config.max_request_body_size, 1024 * 1024);
        assert!(config.uses_default_api_key());
        assert!(!config.cors_enabled());
    }

    #[test]
    fn test_server_addr_format() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };

        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_custom_api_key_is_not_default() {
        let config = Config {
            api_key: "prod-secret".to_string(),
            ..Config::default()
        };

        assert!(!config.uses_default_api_key());
    }

    #[test]
    fn test_validate_empty_api_key() {
        let config = Config {
            api_key: String::new(),
            ..Config::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("APP_API_KEY"));
    }

    #[test]
    fn test_validate_zero_body_size() {
        let config = Config {
            max_request_body_size: 0,
            ..Config::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("MAX_REQUEST_BODY_SIZE")
        );
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }
}
