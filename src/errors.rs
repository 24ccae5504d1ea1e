use crate::container::ContainerError;
use crate::engine::EngineError;
use thiserror::Error;

/// Top-level error of the `wirebox` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Invalid value for '{field}': {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
