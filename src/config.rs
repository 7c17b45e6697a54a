//! # Engine Configuration
//!
//! Typed configuration for the orchestration engine, layered from defaults,
//! an optional TOML file, and `PUBFLOW_*` environment variables. Kept
//! deliberately small: the engine's only tunable is how long a single
//! capability call may run before it is reported as a transient failure.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Runtime configuration for the orchestration engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout applied to every capability call, in seconds. A step that
    /// exceeds it fails transient and the plan halts.
    pub step_timeout_seconds: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_timeout_seconds: 300,
        }
    }
}

impl EngineConfig {
    /// Load configuration from defaults, the file named by `PUBFLOW_CONFIG`
    /// (if set), and `PUBFLOW_*` environment variables, in that precedence.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PUBFLOW_CONFIG").ok();
        Self::load_from(path.as_deref())
    }

    /// Load configuration with an explicit (optional) file path.
    pub fn load_from(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("step_timeout_seconds", 300u64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let loaded: Self = builder
            .add_source(Environment::with_prefix("PUBFLOW").try_parsing(true))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "step_timeout_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
