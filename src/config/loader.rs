//! Configuration Loader
//!
//! Environment-aware configuration loading. Layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. `<config_dir>/job-core.toml`
//! 3. `<config_dir>/job-core.<environment>.toml`
//! 4. `TASKER_JOB_*` environment variables, `__` separating nested keys
//!    (e.g. `TASKER_JOB_DISPATCH__QUEUE_CAPACITY=512`)
//!
//! Both files are optional.

use super::error::{ConfigResult, ConfigurationError};
use super::JobCoreConfig;
use ::config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const CONFIG_FILE_STEM: &str = "job-core";
const ENV_PREFIX: &str = "TASKER_JOB";

/// Loaded configuration together with where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: JobCoreConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = crate::logging::get_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_layers(config_dir, environment, None)
    }

    /// Load configuration with explicit variables standing in for the process
    /// environment. Keys use the same `TASKER_JOB_*` names.
    ///
    /// This is useful for testing without modifying global environment variables
    pub fn load_with_overrides(
        config_dir: Option<PathBuf>,
        environment: &str,
        overrides: HashMap<String, String>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_layers(config_dir, environment, Some(overrides))
    }

    fn load_layers(
        config_dir: Option<PathBuf>,
        environment: &str,
        env_source: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let defaults = Config::try_from(&JobCoreConfig::default())
            .map_err(|e| ConfigurationError::load_error("defaults", e))?;

        let base_file = Self::config_file(&config_directory, None);
        let env_file = Self::config_file(&config_directory, Some(environment));

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::from(base_file.as_path()).required(false))
            .add_source(File::from(env_file.as_path()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env_source),
            )
            .build()
            .map_err(|e| ConfigurationError::load_error(config_directory.display().to_string(), e))?;

        let config: JobCoreConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(
            environment = environment,
            policy = ?config.transitions.policy,
            queue_capacity = config.dispatch.queue_capacity,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &JobCoreConfig {
        &self.config
    }

    /// Get the environment the configuration was loaded for
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// `TASKER_CONFIG_DIR` when set, otherwise `./config`
    fn default_config_directory() -> PathBuf {
        std::env::var("TASKER_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }

    fn config_file(dir: &Path, environment: Option<&str>) -> PathBuf {
        match environment {
            Some(env) => dir.join(format!("{CONFIG_FILE_STEM}.{env}.toml")),
            None => dir.join(format!("{CONFIG_FILE_STEM}.toml")),
        }
    }
}
