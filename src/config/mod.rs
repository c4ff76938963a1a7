//! # Job Core Configuration
//!
//! Settings that shape how jobs behave at runtime: which transitions they
//! accept, how queued subscribers buffer work, and how logging is set up.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasker_job::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let capacity = manager.config().dispatch.queue_capacity;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::state_machine::TransitionPolicy;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JobCoreConfig {
    /// Transition guard settings
    pub transitions: TransitionConfig,

    /// Queued subscriber dispatch settings
    pub dispatch: DispatchConfig,

    /// Structured logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub policy: TransitionPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Maximum number of undelivered notifications a queued subscriber buffers
    /// before the transitioning thread blocks
    pub queue_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; the environment default applies when unset
    pub level: Option<String>,
    pub json: bool,
    pub with_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            json: false,
            with_thread_ids: true,
        }
    }
}

impl JobCoreConfig {
    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dispatch.queue_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "dispatch.queue_capacity",
                "0",
                "queued subscribers need room for at least one notification",
            ));
        }

        if let Some(level) = &self.logging.level {
            EnvFilter::try_new(level).map_err(|e| {
                ConfigurationError::invalid_value("logging.level", level.clone(), e.to_string())
            })?;
        }

        Ok(())
    }
}
