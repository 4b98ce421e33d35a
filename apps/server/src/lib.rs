//! # veggie-server: HTTP API
//!
//! The outward-facing JSON API for the vegetable shop billing backend.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        veggie-server                                    │
//! │                                                                         │
//! │  HTTP request                                                           │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  routes/*         bearer token → current_user → authorize              │
//! │    │              validate input (veggie-core::validation)             │
//! │    ▼                                                                    │
//! │  veggie-db        repositories, billing transaction                    │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ApiError         every failure becomes {"detail": "..."} + status     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod pdf;
pub mod routes;

use veggie_db::Database;

use crate::auth::{JwtManager, PhoneCipher};
use crate::config::AppConfig;

/// Shared application state, wrapped in `web::Data` by main.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: JwtManager,
    pub cipher: PhoneCipher,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Result<Self, config::ConfigError> {
        let jwt = JwtManager::new(&config.jwt_secret, config.jwt_ttl_secs);
        let cipher = PhoneCipher::from_hex_key(&config.phone_key_hex)?;
        Ok(Self {
            db,
            jwt,
            cipher,
            config,
        })
    }
}
