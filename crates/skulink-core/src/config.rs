//! Configuration module
//!
//! Settings are read from the environment (optionally seeded from a `.env` file).
//! [`EngineConfig`] is the subset the matching/attachment engine needs; [`Config`]
//! adds the locations used by the command-line front end.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

// Common constants
const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
const MIN_IMAGE_DIMENSION: u32 = 50;
const CHUNK_SIZE: usize = 10;
const SESSION_TTL_SECS: u64 = 3600;
const DEFAULT_ALLOWED_TYPES: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Limits applied by the attachment engine to every upload item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_upload_bytes: u64,
    pub min_image_dimension: u32,
    /// Lowercase type names (file extensions / MIME subtypes)
    pub allowed_types: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            min_image_dimension: MIN_IMAGE_DIMENSION,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    pub fn is_allowed_type(&self, type_name: &str) -> bool {
        let normalized = type_name.to_lowercase();
        self.allowed_types.iter().any(|t| *t == normalized)
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub engine: EngineConfig,
    pub chunk_size: usize,
    pub session_ttl_secs: u64,
    pub storage_path: PathBuf,
    pub catalog_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            chunk_size: CHUNK_SIZE,
            session_ttl_secs: SESSION_TTL_SECS,
            storage_path: PathBuf::from("./media"),
            catalog_path: PathBuf::from("./catalog.json"),
        }
    }
}

fn parse_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value })
        }
        _ => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let allowed_types = env::var("SKULINK_ALLOWED_TYPES")
            .map(|s| {
                s.split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.engine.allowed_types);

        let config = Config {
            engine: EngineConfig {
                max_upload_bytes: parse_env("SKULINK_MAX_UPLOAD_BYTES", MAX_UPLOAD_BYTES)?,
                min_image_dimension: parse_env("SKULINK_MIN_IMAGE_DIMENSION", MIN_IMAGE_DIMENSION)?,
                allowed_types,
            },
            chunk_size: parse_env("SKULINK_CHUNK_SIZE", CHUNK_SIZE)?,
            session_ttl_secs: parse_env("SKULINK_SESSION_TTL_SECS", SESSION_TTL_SECS)?,
            storage_path: env::var("SKULINK_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            catalog_path: env::var("SKULINK_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "SKULINK_MAX_UPLOAD_BYTES must be greater than zero".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "SKULINK_CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }
        if self.engine.allowed_types.is_empty() {
            return Err(ConfigError::Invalid(
                "SKULINK_ALLOWED_TYPES must list at least one type".to_string(),
            ));
        }
        Ok(())
    }
}
