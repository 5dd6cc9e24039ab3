//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// Sampling temperature used for every completion unless overridden.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Shared secret expected as `Authorization: Bearer <auth_token>`.
    pub auth_token: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    /// Root under which `components/user` and `backups` live.
    pub website_base_path: PathBuf,
    pub temperature: f32,
    /// Maximum number of backups kept per user. `None` keeps every backup.
    pub backup_retention: Option<usize>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let auth_token = std::env::var("AUTH_TOKEN")
            .map_err(|_| ConfigError::MissingVar("AUTH_TOKEN".to_string()))?;
        if auth_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "AUTH_TOKEN".to_string(),
                "the token must not be empty".to_string(),
            ));
        }

        // --- Load Upstream API Settings ---
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let openai_base_url = std::env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let temperature = match std::env::var("GENERATION_TEMPERATURE") {
            Ok(raw) => raw.parse::<f32>().map_err(|e| {
                ConfigError::InvalidValue("GENERATION_TEMPERATURE".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        // --- Load Storage Settings ---
        let website_base_path = std::env::var("WEBSITE_BASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./website/src"));

        let backup_retention = match std::env::var("BACKUP_RETENTION") {
            Ok(raw) => {
                let keep = raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidValue("BACKUP_RETENTION".to_string(), e.to_string())
                })?;
                if keep == 0 {
                    return Err(ConfigError::InvalidValue(
                        "BACKUP_RETENTION".to_string(),
                        "must keep at least one backup".to_string(),
                    ));
                }
                Some(keep)
            }
            Err(_) => None,
        };

        Ok(Self {
            bind_address,
            log_level,
            auth_token,
            openai_api_key,
            openai_base_url,
            website_base_path,
            temperature,
            backup_retention,
        })
    }

    /// The exact `Authorization` header value accepted by the service.
    pub fn expected_authorization(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }
}
