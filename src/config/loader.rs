use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::errors::ConfigError;

use super::app_config::AppConfig;

/// Configuration loader responsible for loading config from files and environment
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Load complete application configuration
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let env_map = self.collect_env_vars();
        self.load_with_env(&env_map)
    }

    /// Load configuration using an explicit environment snapshot (for testing)
    pub fn load_with_env(&self, env_map: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
        let mut config = self.load_file()?;
        config.apply_env(env_map)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the TOML file; a missing file yields the defaults
    fn load_file(&self) -> Result<AppConfig, ConfigError> {
        let Some(path) = &self.path else {
            return Ok(AppConfig::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let display = path.display().to_string();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(display.clone(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::TomlParse(display, e))
    }

    fn collect_env_vars(&self) -> HashMap<String, String> {
        env::vars()
            .filter(|(key, _)| key.starts_with("WIREBOX_"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::app_config::ENV_ENGINE_HOST;
    use crate::logging::LogFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let loader = ConfigLoader::new(Some(PathBuf::from("/nonexistent/wirebox.toml")));

        let config = loader.load_with_env(&HashMap::new()).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
[engine]
host = "unix:///var/run/docker.sock"

[logging]
format = "compact"
"#,
        );
        let loader = ConfigLoader::new(Some(file.path().to_path_buf()));

        let config = loader.load_with_env(&HashMap::new()).unwrap();

        assert_eq!(config.engine.host.as_deref(), Some("unix:///var/run/docker.sock"));
        assert_eq!(config.engine.timeout_secs, 120);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("[engine]\nhost = \"tcp://file:2375\"\n");
        let loader = ConfigLoader::new(Some(file.path().to_path_buf()));
        let env_map = HashMap::from([(ENV_ENGINE_HOST.to_string(), "tcp://env:2375".to_string())]);

        let config = loader.load_with_env(&env_map).unwrap();

        assert_eq!(config.engine.host.as_deref(), Some("tcp://env:2375"));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("[engine\nhost = ");
        let loader = ConfigLoader::new(Some(file.path().to_path_buf()));

        let result = loader.load_with_env(&HashMap::new());

        assert!(matches!(result, Err(ConfigError::TomlParse(_, _))));
    }
}
