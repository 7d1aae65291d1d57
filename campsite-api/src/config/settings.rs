//! Environment-driven settings.

use std::env;
use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use campsite_repository::StoreConfig;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

use crate::AppError;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";

/// Default prefix every route is mounted under.
const DEFAULT_API_PREFIX: &str = "/api";

/// Where content is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB at the configured connection string.
    Mongo(StoreConfig),
    /// Process-local store. Content is lost on restart.
    Memory,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsOrigins {
    /// Any origin, without credentials.
    #[default]
    Any,
    /// Only the listed origins, with credentials.
    List(Vec<HeaderValue>),
}

/// Runtime configuration for the content API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub store: StoreBackend,
    pub bind_addr: SocketAddr,
    /// Route prefix, normalized to either empty or `/segment` without a trailing slash.
    pub api_prefix: String,
    pub cors_origins: CorsOrigins,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::Memory,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8001)),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            cors_origins: CorsOrigins::Any,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STORE_BACKEND`: `mongo` or `memory` (default: mongo)
    /// - `MONGO_URL`: MongoDB connection string (required for mongo)
    /// - `DB_NAME`: Database name (required for mongo)
    /// - `BIND_ADDR`: Listen address (default: 0.0.0.0:8001)
    /// - `API_PREFIX`: Route prefix (default: /api)
    /// - `CORS_ALLOWED_ORIGINS`: `*` or a comma-separated origin list (default: *)
    /// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let store = match lookup("STORE_BACKEND")
            .unwrap_or_else(|| "mongo".to_string())
            .to_lowercase()
            .as_str()
        {
            "mongo" | "mongodb" => {
                let url = required(&lookup, "MONGO_URL")?;
                let database = required(&lookup, "DB_NAME")?;
                StoreBackend::Mongo(StoreConfig::new(url, database))
            }
            "memory" => StoreBackend::Memory,
            other => {
                return Err(AppError::config(format!(
                    "STORE_BACKEND must be 'mongo' or 'memory', got '{}'",
                    other
                )))
            }
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::config(format!("invalid BIND_ADDR: {}", e)))?;

        let api_prefix = normalize_prefix(
            &lookup("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        );

        let cors_origins = parse_cors_origins(
            &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()),
        )?;

        let log_format = match lookup("LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "" | "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(AppError::config(format!(
                    "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            store,
            bind_addr,
            api_prefix,
            cors_origins,
            log_format,
        })
    }

    /// Build the CORS layer for the configured origins.
    pub fn cors_layer(&self) -> CorsLayer {
        match &self.cors_origins {
            CorsOrigins::Any => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
            CorsOrigins::List(origins) => CorsLayer::new()
                .allow_origin(origins.clone())
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        }
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, AppError> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::config(format!("{} must be set", key)))
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, AppError> {
    if raw.trim() == "*" {
        return Ok(CorsOrigins::Any);
    }

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                AppError::config(format!("invalid CORS origin '{}': {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(AppError::config("CORS_ALLOWED_ORIGINS is empty"));
    }
    Ok(CorsOrigins::List(origins))
}
