//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BLOGBOX_DATABASE_URL` - SQLite connection string (default: `sqlite:blogbox.db`)
//! - `BLOGBOX_HOST` - Bind address (default: 127.0.0.1)
//! - `BLOGBOX_PORT` - Listen port (default: 5064)
//! - `BLOGBOX_CORS_ORIGIN` - Only origin allowed by CORS (default: `http://localhost:5173`)
//! - `STRIPE_SECRET_KEY` - Stripe API key (loaded, not used for payments)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:blogbox.db";
pub const DEFAULT_PORT: u16 = 5064;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// SQLite database connection URL
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origin allowed to call the API from a browser
    pub cors_origin: HeaderValue,
    /// Payment provider settings
    pub stripe: StripeConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
}

/// Stripe configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone, Default)]
pub struct StripeConfig {
    pub secret_key: Option<SecretString>,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field(
                "secret_key",
                &self.secret_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ApiConfig {
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

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let host = get_or("BLOGBOX_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BLOGBOX_HOST".to_owned(), e.to_string()))?;
        let port = get_or("BLOGBOX_PORT", &DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BLOGBOX_PORT".to_owned(), e.to_string()))?;
        let cors_origin = HeaderValue::from_str(&get_or("BLOGBOX_CORS_ORIGIN", DEFAULT_CORS_ORIGIN))
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BLOGBOX_CORS_ORIGIN".to_owned(), e.to_string())
            })?;

        Ok(Self {
            database_url: get_or("BLOGBOX_DATABASE_URL", DEFAULT_DATABASE_URL),
            host,
            port,
            cors_origin,
            stripe: StripeConfig {
                secret_key: lookup("STRIPE_SECRET_KEY")
                    .filter(|key| !key.is_empty())
                    .map(SecretString::from),
            },
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
