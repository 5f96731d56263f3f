//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `MOCKSHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `MOCKSHOP_PORT` - Listen port (default: 3000)
//! - `MOCKSHOP_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `MOCKSHOP_LATENCY_MIN_MS` - Lower bound of simulated latency (default: 100)
//! - `MOCKSHOP_LATENCY_MAX_MS` - Upper bound of simulated latency (default: 400)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::services::Latency;

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
    /// Simulated latency applied to service calls
    pub latency: Latency,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let host = env.parse_or("MOCKSHOP_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("MOCKSHOP_PORT", 3000_u16)?;
        let base_url = env.get_or("MOCKSHOP_BASE_URL", "http://localhost:3000");
        validate_base_url(&base_url)?;

        let latency_min = env.parse_or("MOCKSHOP_LATENCY_MIN_MS", 100_u64)?;
        let latency_max = env.parse_or("MOCKSHOP_LATENCY_MAX_MS", 400_u64)?;
        if latency_min > latency_max {
            return Err(ConfigError::InvalidEnvVar(
                "MOCKSHOP_LATENCY_MIN_MS".to_string(),
                format!("must not exceed MOCKSHOP_LATENCY_MAX_MS ({latency_max})"),
            ));
        }

        Ok(Self {
            host,
            port,
            base_url,
            latency: Latency::new(
                Duration::from_millis(latency_min),
                Duration::from_millis(latency_max),
            ),
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            latency: Latency::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with typed accessors.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable; empty values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Check that the base URL is an absolute http(s) URL with a host.
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("MOCKSHOP_BASE_URL".to_string(), reason);

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("must have a host".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.latency, Latency::default());
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MOCKSHOP_HOST", "0.0.0.0"),
            ("MOCKSHOP_PORT", "8080"),
            ("MOCKSHOP_BASE_URL", "https://shop.example.com"),
            ("MOCKSHOP_LATENCY_MIN_MS", "0"),
            ("MOCKSHOP_LATENCY_MAX_MS", "0"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(config.latency, Latency::none());
        assert_eq!(
            config.sentry_dsn.as_deref(),
            Some("https://key@sentry.example.com/1")
        );
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("MOCKSHOP_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("MOCKSHOP_PORT", "seventy")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MOCKSHOP_PORT"));
    }

    #[test]
    fn test_latency_bounds_must_be_ordered() {
        let err = load(&[
            ("MOCKSHOP_LATENCY_MIN_MS", "500"),
            ("MOCKSHOP_LATENCY_MAX_MS", "100"),
        ])
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "MOCKSHOP_LATENCY_MIN_MS")
        );
    }

    #[test]
    fn test_base_url_must_be_http() {
        assert!(load(&[("MOCKSHOP_BASE_URL", "ftp://shop.example.com")]).is_err());
        assert!(load(&[("MOCKSHOP_BASE_URL", "not a url")]).is_err());
    }
}
