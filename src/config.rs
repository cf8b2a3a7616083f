//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;
use serde::Serialize;

use crate::error::ConfigError;

/// A geographic coordinate, used as the fallback center for local search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API credential for the generative-language service.
    pub api_key: SecretString,
    /// Model identifier.
    pub model: String,
    /// Base endpoint URL for the generative-language API.
    pub endpoint: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Timeout applied to outbound generation requests.
    pub request_timeout: Duration,
    /// Fallback center point for geographically grounded queries, used when
    /// the query string alone does not pin down a location.
    pub fallback_center: GeoPoint,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(30),
            fallback_center: GeoPoint {
                latitude: 37.7749,
                longitude: -122.4194,
            },
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// A missing `GEMINI_API_KEY` degrades to an empty credential (calls
    /// fail predictably with an auth error) rather than aborting startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_key = match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => SecretString::from(key),
            _ => {
                tracing::warn!(
                    "GEMINI_API_KEY is not set; generation requests will fail until it is provided"
                );
                SecretString::from(String::new())
            }
        };

        let model = std::env::var("PRIMEVITALITY_MODEL").unwrap_or(defaults.model);
        let endpoint = std::env::var("PRIMEVITALITY_ENDPOINT").unwrap_or(defaults.endpoint);

        let port = parse_env("PRIMEVITALITY_PORT", defaults.port)?;
        let timeout_secs = parse_env(
            "PRIMEVITALITY_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?;
        let latitude = parse_env(
            "PRIMEVITALITY_FALLBACK_LAT",
            defaults.fallback_center.latitude,
        )?;
        let longitude = parse_env(
            "PRIMEVITALITY_FALLBACK_LNG",
            defaults.fallback_center.longitude,
        )?;

        Ok(Self {
            api_key,
            model,
            endpoint,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
            fallback_center: GeoPoint {
                latitude,
                longitude,
            },
        })
    }
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{e}"),
        }),
        Err(_) => Ok(default),
    }
}
