use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;
use crate::angles::Phase;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    /// Directory holding per-angle outputs and combined summaries
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,

    /// Model identifier passed to the assistant CLI
    #[serde(default = "default_model")]
    pub model: String,

    /// Assistant CLI binary (absolute path or name on PATH)
    #[serde(default = "default_claude_binary")]
    pub binary: PathBuf,

    /// Per sub-task timeout
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    /// Pause between sub-task launches
    #[serde(default = "default_launch_delay_ms")]
    pub launch_delay_ms: u64,

    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
}

/// Worker pool size per phase
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ConcurrencyConfig {
    #[serde(default = "default_explore_concurrency")]
    pub explore: usize,

    #[serde(default = "default_validate_concurrency")]
    pub validate: usize,

    #[serde(default = "default_assess_concurrency")]
    pub assess: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            explore: default_explore_concurrency(),
            validate: default_validate_concurrency(),
            assess: default_assess_concurrency(),
        }
    }
}

impl ConcurrencyConfig {
    pub fn for_phase(&self, phase: Phase) -> usize {
        match phase {
            Phase::Explore => self.explore,
            Phase::Validate => self.validate,
            Phase::Assess => self.assess,
        }
    }

    pub fn set_for_phase(&mut self, phase: Phase, value: usize) {
        match phase {
            Phase::Explore => self.explore = value,
            Phase::Validate => self.validate = value,
            Phase::Assess => self.assess = value,
        }
    }
}
