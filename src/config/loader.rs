//! Configuration Loader
//!
//! Environment-aware loading: embedded defaults, then the base and
//! per-environment TOML files, then `LIAISON__*` environment variables.

use super::LiaisonConfig;
use crate::error::{LiaisonError, LiaisonResult};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Base name of configuration files inside the config directory
const CONFIG_FILE_STEM: &str = "grant-liaison";

/// Prefix of overriding environment variables
const ENV_PREFIX: &str = "LIAISON";

/// Loaded, validated configuration plus where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: LiaisonConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> LiaisonResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> LiaisonResult<Arc<ConfigManager>> {
        let environment = detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> LiaisonResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::build(&config_directory, environment)?;
        config.validate()?;

        info!(
            environment = %environment,
            config_directory = %config_directory.display(),
            call_duration = config.scheduling.default_call_duration_minutes,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Merge all layers into a [`LiaisonConfig`]
    fn build(config_directory: &Path, environment: &str) -> LiaisonResult<LiaisonConfig> {
        let defaults = serde_json::to_string(&LiaisonConfig::default())?;

        let base_file = config_directory.join(format!("{CONFIG_FILE_STEM}.toml"));
        let env_file = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.toml"));

        let merged = config::Config::builder()
            .add_source(config::File::from_str(&defaults, config::FileFormat::Json))
            .add_source(config::File::from(base_file).required(false))
            .add_source(config::File::from(env_file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", environment)?
            .build()?;

        merged.try_deserialize::<LiaisonConfig>().map_err(|e| {
            LiaisonError::Configuration(format!("Failed to deserialize configuration: {e}"))
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &LiaisonConfig {
        &self.config
    }

    /// Get the current environment
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Get the configuration directory
    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }
}

/// Detect current environment from environment variables
pub fn detect_environment() -> String {
    env::var("LIAISON_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
        .to_lowercase()
}
