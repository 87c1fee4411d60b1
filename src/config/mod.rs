mod defaults;
mod types;

pub use defaults::DEFAULT_CONFIG_FILE;
pub use types::*;

use crate::angles::Phase;
use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use std::time::Duration;

impl Default for Config {
    fn default() -> Self {
        Self {
            session_dir: default_session_dir(),
            model: default_model(),
            binary: default_claude_binary(),
            timeout_sec: default_timeout_sec(),
            launch_delay_ms: default_launch_delay_ms(),
            concurrency: ConcurrencyConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load an explicit config file, or `brainstorm.yaml` from the working
    /// directory if present, or fall back to defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            tracing::debug!("Using {}", local.display());
            return Self::load(local);
        }
        Ok(Self::default())
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        for phase in Phase::all() {
            if self.concurrency.for_phase(phase) == 0 {
                return Err(ConfigError::ZeroConcurrency(phase.to_string()));
            }
        }
        if self.timeout_sec == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }

    pub fn launch_delay(&self) -> Duration {
        Duration::from_millis(self.launch_delay_ms)
    }
}
