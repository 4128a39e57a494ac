//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, Environment, File};
use oxcart_core::OxcartError;
use std::path::Path;
use tracing::{debug, info};

/// Loads configuration from layered sources.
///
/// Sources are applied in order:
/// 1. `config/default.toml` - default values
/// 2. `config/{environment}.toml` - environment-specific overrides
/// 3. `config/local.toml` - local overrides (not committed)
/// 4. Environment variables with the `OXCART_` prefix (`__` separator)
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<AppConfig, OxcartError> {
        Self::load("./config")
    }

    /// Loads configuration from the specified directory.
    pub fn load(config_dir: &str) -> Result<AppConfig, OxcartError> {
        let environment =
            std::env::var("OXCART_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("OXCART")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| OxcartError::Configuration(e.to_string()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| OxcartError::Configuration(e.to_string()))?;

        Self::validate(&app_config)?;

        Ok(app_config)
    }

    fn validate(config: &AppConfig) -> Result<(), OxcartError> {
        if config.database.url.is_empty() {
            return Err(OxcartError::Configuration(
                "database.url must not be empty".to_string(),
            ));
        }
        if config.mongodb.uri.is_empty() {
            return Err(OxcartError::Configuration(
                "mongodb.uri must not be empty".to_string(),
            ));
        }
        if config.security.jwt_secret.len() < 32 {
            return Err(OxcartError::Configuration(
                "security.jwt_secret must be at least 32 characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_missing_directory_uses_defaults() {
        let config = ConfigLoader::load("./does-not-exist").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_validate_rejects_short_jwt_secret() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "short".to_string();
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(ConfigLoader::validate(&config).is_err());
    }
}
