use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Concurrency for phase '{0}' must be at least 1")]
    ZeroConcurrency(String),

    #[error("Timeout must be at least 1 second")]
    ZeroTimeout,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Execution timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Failed to launch '{binary}': {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Process failed with exit code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create session directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum PhaseError {
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Failed to acquire semaphore: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),
}
