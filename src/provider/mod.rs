mod claude;

pub use claude::ClaudeRunner;

use crate::config::Config;
use crate::error::ProviderError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct ProviderOutput {
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
    /// `None` when the process was killed or terminated by a signal
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

impl ProviderOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// The external assistant, treated as an opaque text-in/text-out command
#[async_trait]
pub trait Assistant: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run one prompt. Timeouts and non-zero exits are reported through
    /// `ProviderOutput`; `Err` is reserved for faults launching or waiting
    /// on the process.
    async fn execute(
        &self,
        prompt: &str,
        working_dir: Option<&Path>,
        timeout: Duration,
    ) -> Result<ProviderOutput, ProviderError>;
}

/// Create the assistant runner described by the config
pub fn create_assistant(config: &Config) -> Arc<dyn Assistant> {
    Arc::new(ClaudeRunner {
        binary: config.binary.clone(),
        model: config.model.clone(),
    })
}
