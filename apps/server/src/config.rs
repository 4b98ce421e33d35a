//! # Server Configuration
//!
//! All configuration comes from environment variables (plus a `.env` file in
//! development, loaded by main before this runs). Secrets have no defaults:
//! a missing `JWT_SECRET` or `PHONE_KEY` is a hard startup failure, never a
//! silently generated value.

use std::env;

use thiserror::Error;

/// Configuration errors. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address, default `0.0.0.0`.
    pub http_host: String,
    /// Bind port, default `8080`.
    pub http_port: u16,

    /// PostgreSQL connection string. Required.
    pub database_url: String,
    /// Pool size, default 10.
    pub db_max_connections: u32,

    /// HMAC secret for JWT signing. Required.
    pub jwt_secret: String,
    /// Token lifetime in seconds, default 24 hours.
    pub jwt_ttl_secs: i64,

    /// AES-256 key for phone number encryption, 64 hex chars. Required.
    pub phone_key_hex: String,

    /// Printed in the bill header when set.
    pub shop_address: Option<String>,
    pub shop_phone: Option<String>,
    /// TTF with Tamil glyphs; built-in Helvetica (latin names only) without it.
    pub bill_font_path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: parse_var("HTTP_PORT", 8080)?,
            database_url: require("DATABASE_URL")?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            jwt_secret: require("JWT_SECRET")?,
            jwt_ttl_secs: parse_var("JWT_TTL_SECS", 86_400)?,
            phone_key_hex: require("PHONE_KEY")?,
            shop_address: env::var("SHOP_ADDRESS").ok(),
            shop_phone: env::var("SHOP_PHONE").ok(),
            bill_font_path: env::var("BILL_FONT_PATH").ok(),
        };

        if config.jwt_secret.len() < 16 {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: "must be at least 16 characters".to_string(),
            });
        }

        Ok(config)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
