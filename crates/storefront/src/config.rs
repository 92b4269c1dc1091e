//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `INSURA_HOST` - Bind address (default: 127.0.0.1)
//! - `INSURA_PORT` - Listen port (default: 3000)
//! - `INSURA_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `INSURA_DATA_DIR` - Directory holding the local store (default: ./data)
//! - `INSURA_SEED_DEMO_USER` - Seed the demo account at startup (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of requests traced (default: 0.0)
//! - `INSURA_LOG_JSON` - Emit JSON log lines instead of text (default: false)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory holding `local_storage.json`
    pub data_dir: PathBuf,
    /// Whether to seed the demo account at startup
    pub seed_demo_user: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
    /// Emit structured JSON logs
    pub log_json: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("./data"),
            seed_demo_user: true,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_traces_sample_rate: 0.0,
            log_json: false,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("INSURA_HOST", "127.0.0.1")?;
        let port = parse_env("INSURA_PORT", "3000")?;
        let base_url = get_env_or_default("INSURA_BASE_URL", "http://localhost:3000");
        let data_dir = PathBuf::from(get_env_or_default("INSURA_DATA_DIR", "./data"));
        let seed_demo_user = parse_bool("INSURA_SEED_DEMO_USER", true)?;
        let sentry_traces_sample_rate = parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;
        let log_json = parse_bool("INSURA_LOG_JSON", false)?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            seed_demo_user,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate,
            log_json,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a boolean flag (`true/false`, `1/0`, `yes/no`).
fn parse_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |value| parse_bool_value(key, &value))
}

fn parse_bool_value(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_value() {
        assert!(parse_bool_value("K", "true").unwrap());
        assert!(parse_bool_value("K", " YES ").unwrap());
        assert!(parse_bool_value("K", "1").unwrap());
        assert!(!parse_bool_value("K", "false").unwrap());
        assert!(!parse_bool_value("K", "off").unwrap());
    }

    #[test]
    fn test_parse_bool_value_invalid() {
        let err = parse_bool_value("INSURA_SEED_DEMO_USER", "maybe").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "INSURA_SEED_DEMO_USER"));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            port: 8080,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_is_secure_follows_base_url() {
        let mut config = StorefrontConfig::default();
        assert!(!config.is_secure());

        config.base_url = "https://insura.example".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(config.seed_demo_user);
        assert!(config.sentry_dsn.is_none());
    }
}
