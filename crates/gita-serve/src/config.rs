//! Application configuration loaded from environment variables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method};

/// Default CORS origin (the production frontend).
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://bhagwad-geeta.vercel.app";

/// Default CORS methods.
pub const DEFAULT_ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Cross-origin policy for the frontend.
    pub cors: CorsConfig,

    /// Port for the Prometheus `/metrics` endpoint (disabled when unset).
    pub metrics_port: Option<u16>,
}

/// Database connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL/CockroachDB connection URL.
    pub url: String,

    /// Maximum number of pooled connections.
    pub pool_size: usize,

    /// Deadline for waiting on, creating, and recycling pooled connections.
    pub timeout: Duration,
}

// The URL carries credentials.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("pool_size", &self.pool_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Cross-origin resource sharing policy.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// The single origin allowed to call the API.
    pub allowed_origin: HeaderValue,

    /// Methods advertised to preflight requests.
    pub allowed_methods: Vec<Method>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `CONNECTION_STRING`: PostgreSQL/CockroachDB connection URL
    ///
    /// Optional:
    /// - `GITA_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `GITA_ALLOWED_ORIGIN`: CORS origin (default: "https://bhagwad-geeta.vercel.app")
    /// - `GITA_ALLOWED_METHODS`: Comma-separated CORS methods (default: "GET, POST, PUT, DELETE, OPTIONS")
    /// - `GITA_DB_POOL_SIZE`: Max pooled connections (default: 16)
    /// - `GITA_DB_TIMEOUT_SECS`: Pool wait/create/recycle timeout (default: 5)
    /// - `GITA_METRICS_PORT`: Serve Prometheus metrics on this port
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("GITA_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let url = std::env::var("CONNECTION_STRING")
            .map_err(|_| anyhow::anyhow!("CONNECTION_STRING environment variable is required"))?;
        if url.trim().is_empty() {
            anyhow::bail!("CONNECTION_STRING must not be empty");
        }

        let pool_size: usize = env_or("GITA_DB_POOL_SIZE", 16)?;
        if pool_size == 0 {
            anyhow::bail!("GITA_DB_POOL_SIZE must be at least 1");
        }
        let timeout = Duration::from_secs(env_or("GITA_DB_TIMEOUT_SECS", 5)?);

        let allowed_origin = parse_origin(
            &std::env::var("GITA_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string()),
        )?;

        let allowed_methods = parse_methods(
            &std::env::var("GITA_ALLOWED_METHODS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_METHODS.to_string()),
        )?;

        let metrics_port = match std::env::var("GITA_METRICS_PORT") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("GITA_METRICS_PORT is not a valid port: '{raw}'"))?,
            ),
            _ => None,
        };

        tracing::info!(
            bind_addr = %bind_addr,
            pool_size,
            db_timeout_secs = timeout.as_secs(),
            allowed_origin = ?allowed_origin,
            allowed_methods = ?allowed_methods,
            metrics_port = ?metrics_port,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            database: DatabaseConfig {
                url,
                pool_size,
                timeout,
            },
            cors: CorsConfig {
                allowed_origin,
                allowed_methods,
            },
            metrics_port,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        _ => Ok(default),
    }
}

/// Browsers send the origin without a trailing slash, so one is stripped.
fn parse_origin(raw: &str) -> anyhow::Result<HeaderValue> {
    let origin = raw.trim().trim_end_matches('/');
    if !(origin.starts_with("https://") || origin.starts_with("http://")) {
        anyhow::bail!("GITA_ALLOWED_ORIGIN must be an http(s) origin, got '{raw}'");
    }
    HeaderValue::from_str(origin)
        .with_context(|| format!("GITA_ALLOWED_ORIGIN is not a valid header value: '{raw}'"))
}

fn parse_methods(raw: &str) -> anyhow::Result<Vec<Method>> {
    let methods = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Method::from_bytes(s.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("GITA_ALLOWED_METHODS contains an invalid method: '{s}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if methods.is_empty() {
        anyhow::bail!("GITA_ALLOWED_METHODS must contain at least one method");
    }
    Ok(methods)
}
