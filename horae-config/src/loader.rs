//! Configuration loading and environment variable handling

use crate::domains::HoraeConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "HORAE".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Load configuration from a YAML or JSON file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<HoraeConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let mut config: HoraeConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<HoraeConfig> {
        let mut config = HoraeConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<HoraeConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut HoraeConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_graphql_overrides(&mut config.graphql)?;
        self.apply_i18n_overrides(&mut config.i18n)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_server_overrides(&self, config: &mut crate::domains::server::ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = self.parse_env("SERVER_PORT", &port)?;
        }

        Ok(())
    }

    fn apply_graphql_overrides(&self, config: &mut crate::domains::graphql::GraphQLConfig) -> ConfigResult<()> {
        if let Ok(timezone) = self.get_env_var("GRAPHQL_TIMEZONE") {
            config.timezone = timezone;
        }

        if let Ok(enabled) = self.get_env_var("GRAPHIQL") {
            config.enable_graphiql = self.parse_env("GRAPHIQL", &enabled)?;
        }

        if let Ok(enabled) = self.get_env_var("GRAPHQL_INTROSPECTION") {
            config.enable_introspection = self.parse_env("GRAPHQL_INTROSPECTION", &enabled)?;
        }

        Ok(())
    }

    fn apply_i18n_overrides(&self, config: &mut crate::domains::i18n::I18nConfig) -> ConfigResult<()> {
        if let Ok(dir) = self.get_env_var("LOCALE_DIR") {
            config.locale_dir = PathBuf::from(dir);
        }

        if let Ok(locales) = self.get_env_var("LOCALES") {
            config.locales = locales
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(())
    }

    fn apply_logging_overrides(&self, config: &mut crate::domains::logging::LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    fn parse_env<T>(&self, key: &str, value: &str) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {}_{}: {}", self.prefix, key, e)))
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, key: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::logging::{LogFormat, LogLevel};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(["HORAE_SERVER_PORT", "HORAE_LOCALES", "HORAE_LOG_LEVEL"], || {
            let config = ConfigLoader::new().from_env().unwrap();
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.i18n.locales, vec!["en", "fr"]);
        });
    }

    #[test]
    fn test_env_overrides() {
        temp_env::with_vars(
            [
                ("HORAE_SERVER_PORT", Some("4000")),
                ("HORAE_LOCALES", Some("fr, en ,de")),
                ("HORAE_LOG_LEVEL", Some("debug")),
                ("HORAE_LOG_FORMAT", Some("json")),
                ("HORAE_GRAPHIQL", Some("false")),
            ],
            || {
                let config = ConfigLoader::new().from_env().unwrap();
                assert_eq!(config.server.port, 4000);
                assert_eq!(config.i18n.locales, vec!["fr", "en", "de"]);
                assert_eq!(config.logging.level, LogLevel::Debug);
                assert_eq!(config.logging.format, LogFormat::Json);
                assert!(!config.graphql.enable_graphiql);
            },
        );
    }

    #[test]
    fn test_invalid_env_value() {
        temp_env::with_var("HORAE_SERVER_PORT", Some("not-a-port"), || {
            let err = ConfigLoader::new().from_env().unwrap_err();
            assert!(matches!(err, ConfigError::EnvError(_)));
            assert!(err.to_string().contains("HORAE_SERVER_PORT"));
        });
    }

    #[test]
    fn test_custom_prefix() {
        temp_env::with_var("CLOCK_SERVER_PORT", Some("5000"), || {
            let config = ConfigLoader::with_prefix("CLOCK").from_env().unwrap();
            assert_eq!(config.server.port, 5000);
        });
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "server:\n  port: 3100\ngraphql:\n  timezone: Europe/Paris\ni18n:\n  locale_dir: /srv/locale"
        )
        .unwrap();

        temp_env::with_vars_unset(["HORAE_SERVER_PORT", "HORAE_GRAPHQL_TIMEZONE", "HORAE_LOCALE_DIR"], || {
            let config = ConfigLoader::new().load(Some(file.path())).unwrap();
            assert_eq!(config.server.port, 3100);
            assert_eq!(config.graphql.timezone, "Europe/Paris");
            assert_eq!(config.i18n.locale_dir, PathBuf::from("/srv/locale"));
        });
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, r#"{{"i18n": {{"locales": ["fr"], "cookie_name": null}}}}"#).unwrap();

        temp_env::with_vars_unset(["HORAE_LOCALES"], || {
            let config = ConfigLoader::new().from_file(file.path()).unwrap();
            assert_eq!(config.i18n.locales, vec!["fr"]);
            assert!(config.i18n.cookie_name.is_none());
        });
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "graphql:\n  timezone: Nowhere/Special").unwrap();

        temp_env::with_vars_unset(["HORAE_GRAPHQL_TIMEZONE"], || {
            let err = ConfigLoader::new().from_file(file.path()).unwrap_err();
            assert!(matches!(err, ConfigError::DomainError { .. }));
        });
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new().from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError(_)));
    }
}
