pub mod app_config;
pub mod loader;

// Re-export commonly used types
pub use app_config::{AppConfig, EngineConfig, APP_CONFIG};
pub use loader::ConfigLoader;

// Re-export constants
pub use app_config::{
    DEFAULT_ENGINE_TIMEOUT_SECS, ENV_ENGINE_HOST, ENV_ENGINE_TIMEOUT, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
};
