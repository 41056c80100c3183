// Process configuration.
//
// Responsibilities
// - Load `.env` (never overriding variables that are already set).
// - Parse the environment into a typed, read-only AppConfig.
//
// Connector credentials are optional here. When absent they surface as
// connection failures during startup, not as configuration errors.

use crate::shared::infrastructure::connectors::cloudinary::MediaHostSettings;
use crate::shared::infrastructure::connectors::mongo::DatabaseSettings;
use axum::http::HeaderValue;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://your-frontend-name.vercel.app",
];
pub const DEFAULT_STATIC_DIR: &str = "public/images";
pub const DEFAULT_JSON_BODY_LIMIT: usize = 100 * 1024;
pub const DEFAULT_DATABASE_NAME: &str = "booking";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("CORS origin is not a valid header value: {0:?}")]
    InvalidOrigin(String),

    #[error("CORS origin \"*\" cannot be combined with credentials; list the origins instead")]
    WildcardOrigin,

    #[error("failed to read .env file")]
    EnvFile(#[source] dotenvy::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub static_dir: PathBuf,
    pub json_body_limit: usize,
    pub database: DatabaseSettings,
    pub media_host: MediaHostSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_origins: Vec<String> = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };
        let allowed_origins = raw_origins
            .into_iter()
            .map(parse_origin)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            host: parse_or("HOST", get("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            allowed_origins,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            json_body_limit: parse_or(
                "JSON_BODY_LIMIT",
                get("JSON_BODY_LIMIT"),
                DEFAULT_JSON_BODY_LIMIT,
            )?,
            database: DatabaseSettings {
                uri: get("MONGODB_URI"),
                name: get("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE_NAME.into()),
                connect_timeout: Duration::from_secs(parse_or(
                    "MONGODB_CONNECT_TIMEOUT_SECS",
                    get("MONGODB_CONNECT_TIMEOUT_SECS"),
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                )?),
            },
            media_host: MediaHostSettings {
                cloud_name: get("CLOUDINARY_NAME"),
                api_key: get("CLOUDINARY_API_KEY"),
                api_secret: get("CLOUDINARY_SECRET_KEY"),
            },
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_origin(origin: String) -> Result<HeaderValue, ConfigError> {
    // Credentialed CORS never matches a wildcard.
    if origin == "*" {
        return Err(ConfigError::WildcardOrigin);
    }
    HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidOrigin(origin))
}

/// A missing env file is fine; an unreadable or malformed one is not.
fn tolerate_missing<T>(loaded: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::EnvFile(e)),
    }
}

/// Loads `.env` if present, then reads the process environment.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    tolerate_missing(dotenvy::dotenv())?;
    AppConfig::from_env()
}
