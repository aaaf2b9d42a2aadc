use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError};

use crate::formatting::NumberLocale;
use crate::generators::DatasetCalendar;
use crate::services::DEFAULT_DASHBOARD_LENGTH;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_LOCALE: &str = "ja-JP";
const DEFAULT_EXPORT_DIR: &str = "exports";
const CONFIG_DIR: &str = "config";
const MAX_DASHBOARD_LENGTH: usize = 1_000_000;

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Records generated per collection for the dashboard
    #[serde(default = "default_dashboard_length")]
    #[validate(custom = "validate_dashboard_length")]
    pub dashboard_length: usize,

    /// Display locale for KPI values ("ja-JP" or "en-US")
    #[serde(default = "default_locale")]
    #[validate(custom = "validate_locale")]
    pub locale: String,

    /// Directory that table exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Month split used to date generated records
    #[serde(default)]
    #[validate]
    pub calendar: DatasetCalendar,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            dashboard_length: default_dashboard_length(),
            locale: default_locale(),
            export_dir: default_export_dir(),
            calendar: DatasetCalendar::default(),
        }
    }
}

impl AppConfig {
    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Parsed display locale. Falls back to the default for unvalidated configs.
    pub fn number_locale(&self) -> NumberLocale {
        NumberLocale::from_str(&self.locale).unwrap_or_default()
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_dashboard_length() -> usize {
    DEFAULT_DASHBOARD_LENGTH
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => {
            let mut err = ValidationError::new("log_level");
            err.message = Some("Must be one of: trace, debug, info, warn, error".into());
            Err(err)
        }
    }
}

fn validate_dashboard_length(length: usize) -> Result<(), ValidationError> {
    if length > MAX_DASHBOARD_LENGTH {
        let mut err = ValidationError::new("dashboard_length");
        err.message =
            Some(format!("dashboard_length must not exceed {}", MAX_DASHBOARD_LENGTH).into());
        return Err(err);
    }
    Ok(())
}

fn validate_locale(locale: &str) -> Result<(), ValidationError> {
    if NumberLocale::from_str(locale).is_err() {
        let mut err = ValidationError::new("locale");
        err.message = Some("Must be one of: ja-JP, en-US".into());
        return Err(err);
    }
    Ok(())
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("demo_dashboard_data={}", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    // Logs go to stderr so exported tables and JSON on stdout stay clean.
    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .with_writer(std::io::stderr)
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Loads application configuration from the working directory.
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables (APP__*)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    load_config_from(Path::new(CONFIG_DIR))
}

/// Same as [`load_config`] with an explicit configuration directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !config_dir.exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            config_dir.display()
        );
    }

    let config = Config::builder()
        .set_default("environment", run_env.as_str())?
        .add_source(File::from(config_dir.join("default")).required(false))
        .add_source(File::from(config_dir.join(&run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}
