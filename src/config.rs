//! Application configuration
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Firestore project id
    pub firestore_project: String,
    /// Collection the appointment documents are written to
    pub firestore_collection: String,
    /// Host:port of a local Firestore emulator; unset means the public endpoint
    pub emulator_host: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Scratch directory for camera captures
    pub capture_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let firestore_project = env::var("FIRESTORE_PROJECT")
            .map_err(|_| ConfigError::Missing("FIRESTORE_PROJECT is required".to_string()))?;

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::Invalid(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => 30,
        };

        Ok(Config {
            firestore_project,
            firestore_collection: env::var("FIRESTORE_COLLECTION")
                .unwrap_or_else(|_| "appointments".to_string()),
            emulator_host: env::var("FIRESTORE_EMULATOR_HOST")
                .ok()
                .filter(|h| !h.trim().is_empty()),
            request_timeout_secs,
            capture_dir: env::var("CAPTURE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("carcare-captures")),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
