//! # Liaison Configuration System
//!
//! Layered configuration built with the `config` crate:
//!
//! 1. embedded defaults ([`LiaisonConfig::default`])
//! 2. `<config_dir>/grant-liaison.toml`
//! 3. `<config_dir>/grant-liaison.<environment>.toml`
//! 4. environment variables prefixed `LIAISON__`, nested with `__`
//!    (e.g. `LIAISON__SCHEDULING__DEFAULT_CALL_DURATION_MINUTES=45`)
//!
//! Later layers override earlier ones. The merged result is validated before
//! it is handed out.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use grant_liaison::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let minutes = manager.config().scheduling.default_call_duration_minutes;
//! # Ok(())
//! # }
//! ```

pub mod loader;

use crate::constants::system;
use crate::error::{LiaisonError, LiaisonResult};
use serde::{Deserialize, Serialize};

pub use loader::ConfigManager;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiaisonConfig {
    pub environment: String,
    pub logging: LoggingConfig,
    pub scheduling: SchedulingConfig,
}

impl Default for LiaisonConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            logging: LoggingConfig::default(),
            scheduling: SchedulingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `grant_liaison=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Defaults applied to calls the engine schedules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    pub default_call_duration_minutes: u32,
    pub default_reminder_minutes: u32,
    pub default_location: String,
    /// Call type of follow-ups spawned by status changes
    pub status_update_call_type: String,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            default_call_duration_minutes: system::DEFAULT_CALL_DURATION_MINUTES,
            default_reminder_minutes: system::DEFAULT_REMINDER_MINUTES,
            default_location: system::DEFAULT_CALL_LOCATION.to_string(),
            status_update_call_type: system::STATUS_UPDATE_CALL_TYPE.to_string(),
        }
    }
}

impl LiaisonConfig {
    /// Reject values the engine cannot operate with
    pub fn validate(&self) -> LiaisonResult<()> {
        if self.environment.trim().is_empty() {
            return Err(LiaisonError::Configuration(
                "environment must not be empty".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(LiaisonError::Configuration(
                "logging.level must not be empty".to_string(),
            ));
        }
        self.scheduling.validate()
    }
}

impl SchedulingConfig {
    pub fn validate(&self) -> LiaisonResult<()> {
        if self.default_call_duration_minutes == 0 {
            return Err(LiaisonError::Configuration(
                "scheduling.default_call_duration_minutes must be positive".to_string(),
            ));
        }
        // Reminders are capped at one week
        if self.default_reminder_minutes > 7 * 24 * 60 {
            return Err(LiaisonError::Configuration(format!(
                "scheduling.default_reminder_minutes too large: {}",
                self.default_reminder_minutes
            )));
        }
        if self.default_location.trim().is_empty() {
            return Err(LiaisonError::Configuration(
                "scheduling.default_location must not be empty".to_string(),
            ));
        }
        if self.status_update_call_type.trim().is_empty() {
            return Err(LiaisonError::Configuration(
                "scheduling.status_update_call_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
