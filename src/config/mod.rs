use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default = "default_otlp_endpoint_option")]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_enable_json_logging")]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let server = ServerConfig::from_env()?;
        let storage = StorageConfig::from_env()?;
        let observability = ObservabilityConfig::from_env()?;

        let config = Config {
            server,
            storage,
            observability,
        };
        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationError {
                message: "Max upload size cannot be 0".to_string(),
            });
        }

        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Data file path cannot be empty".to_string(),
            });
        }

        if self.storage.images_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Images directory cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn env_section<T: for<'de> Deserialize<'de>>(kind: &str) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("CLEANSITE"))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {kind} config: {e}"),
        })?;

    settings.try_deserialize().map_err(|e| ConfigError::LoadError {
        message: format!("Failed to deserialize {kind} config: {e}"),
    })
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        env_section("server")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        env_section("storage")
    }
}

impl ObservabilityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        env_section("observability")
    }
}

// Default value functions
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    3001
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_max_upload_bytes() -> usize {
    // 16 files of 5MB plus form fields
    85 * 1024 * 1024
}

pub(crate) fn default_data_file() -> PathBuf {
    PathBuf::from("services.json")
}

pub(crate) fn default_images_dir() -> PathBuf {
    PathBuf::from("public/images")
}

pub(crate) fn default_service_name() -> String {
    "cleansite-rs".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_otlp_endpoint_option() -> Option<String> {
    std::env::var("CLEANSITE_OTLP_ENDPOINT").ok()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_enable_json_logging() -> bool {
    std::env::var("CLEANSITE_ENABLE_JSON_LOGGING")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}
