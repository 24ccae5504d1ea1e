use crate::container::{service_name_of, ServiceName};
use crate::errors::ConfigError;
use crate::logging::LoggingConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::loader::ConfigLoader;

// Environment variable names
pub const ENV_ENGINE_HOST: &str = "WIREBOX_ENGINE_HOST";
pub const ENV_ENGINE_TIMEOUT: &str = "WIREBOX_ENGINE_TIMEOUT";
pub const ENV_LOG_LEVEL: &str = "WIREBOX_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "WIREBOX_LOG_FORMAT";

pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 120;

/// Container name under which the shared [`AppConfig`] is registered.
pub static APP_CONFIG: Lazy<ServiceName> = Lazy::new(service_name_of::<AppConfig>);

/// Main Application Configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// Container engine connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `unix://`, `tcp://` or `http://` URL; `None` falls back to `DOCKER_HOST`
    /// and then the platform default socket.
    pub host: Option<String>,
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: None,
            timeout_secs: DEFAULT_ENGINE_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        ConfigLoader::new(path.map(Path::to_path_buf)).load_config()
    }

    /// Apply `WIREBOX_*` overrides from an environment snapshot
    pub fn apply_env(&mut self, env_map: &HashMap<String, String>) -> Result<(), ConfigError> {
        if let Some(host) = env_map.get(ENV_ENGINE_HOST) {
            self.engine.host = Some(host.clone());
        }
        if let Some(timeout) = env_map.get(ENV_ENGINE_TIMEOUT) {
            self.engine.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("engine.timeout_secs", timeout))?;
        }
        if let Some(level) = env_map.get(ENV_LOG_LEVEL) {
            self.logging.level = level.clone();
        }
        if let Some(format) = env_map.get(ENV_LOG_FORMAT) {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.timeout_secs == 0 {
            return Err(ConfigError::invalid("engine.timeout_secs", "0"));
        }
        if let Some(host) = &self.engine.host {
            if host.trim().is_empty() {
                return Err(ConfigError::invalid("engine.host", host));
            }
        }
        self.logging.parsed_level()?;
        Ok(())
    }
}
