pub mod angles;
pub mod phase;
pub mod pipeline;
pub mod schema;

use crate::angles::Phase;
use crate::config::Config;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brainstorm")]
#[command(
    author,
    version,
    about = "Parallel feature brainstorming orchestrator for Claude Code CLI"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (default: brainstorm.yaml if present)
    #[arg(short, long, global = true, env = "BRAINSTORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override session directory
    #[arg(long, global = true, env = "BRAINSTORM_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Override model identifier
    #[arg(long, global = true, env = "BRAINSTORM_MODEL")]
    pub model: Option<String>,

    /// Override per sub-task timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl GlobalArgs {
    /// Resolve the config file and apply command-line overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::resolve(self.config.as_deref())?;

        if let Some(ref dir) = self.session_dir {
            config.session_dir = dir.clone();
        }
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_sec = timeout;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Explore the codebase from several angles in parallel
    Explore(ExploreArgs),

    /// Validate an approach against codebase patterns and research
    Validate(ValidateArgs),

    /// Produce competing implementation proposals
    Assess(AssessArgs),

    /// Run explore, validate and assess in sequence, chaining summaries
    Pipeline(PipelineArgs),

    /// List the angles of each phase
    Angles(AnglesArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Args, Clone, Debug)]
pub struct DispatchArgs {
    /// Override worker pool size for this phase
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Show plan without executing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct ExploreArgs {
    /// Feature description
    #[arg(long)]
    pub feature: String,

    /// Codebase path
    #[arg(long)]
    pub path: PathBuf,

    /// Specific angles to explore (space-separated)
    #[arg(long, num_args = 1..)]
    pub angles: Option<Vec<String>>,

    #[command(flatten)]
    pub dispatch: DispatchArgs,
}

#[derive(Parser, Clone, Debug)]
pub struct ValidateArgs {
    /// Feature description
    #[arg(long)]
    pub feature: String,

    /// Codebase path
    #[arg(long)]
    pub path: PathBuf,

    /// Path to exploration summary
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Specific angles to validate (space-separated)
    #[arg(long, num_args = 1..)]
    pub angles: Option<Vec<String>>,

    #[command(flatten)]
    pub dispatch: DispatchArgs,
}

#[derive(Parser, Clone, Debug)]
pub struct AssessArgs {
    /// Feature description
    #[arg(long)]
    pub feature: String,

    /// Path to validation summary
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Specific angles to assess (space-separated)
    #[arg(long, num_args = 1..)]
    pub angles: Option<Vec<String>>,

    #[command(flatten)]
    pub dispatch: DispatchArgs,
}

#[derive(Parser, Clone, Debug)]
pub struct PipelineArgs {
    /// Feature description
    #[arg(long)]
    pub feature: String,

    /// Codebase path
    #[arg(long)]
    pub path: PathBuf,

    /// Show plan without executing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct AnglesArgs {
    /// Only list this phase
    #[arg(long, value_enum)]
    pub phase: Option<Phase>,
}
