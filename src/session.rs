use crate::angles::Phase;
use crate::error::OutputError;
use std::fs;
use std::path::{Path, PathBuf};

/// File layout of the session directory shared by all phases
#[derive(Debug, Clone)]
pub struct Session {
    root: PathBuf,
}

impl Session {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the session directory (and parents) if absent
    pub fn ensure(&self) -> Result<(), OutputError> {
        fs::create_dir_all(&self.root).map_err(|e| OutputError::CreateDir {
            path: self.root.clone(),
            source: e,
        })
    }

    /// Raw captured output of one angle: `{phase}-{angle}.md`
    pub fn angle_output(&self, phase: Phase, angle_key: &str) -> PathBuf {
        self.root.join(format!("{}-{}.md", phase.name(), angle_key))
    }

    /// Combined document of a phase: `{noun}-summary.md`
    pub fn summary_path(&self, phase: Phase) -> PathBuf {
        self.root.join(format!("{}-summary.md", phase.noun()))
    }

    /// Machine-readable run status of a phase: `{noun}-status.json`
    pub fn status_path(&self, phase: Phase) -> PathBuf {
        self.root.join(format!("{}-status.json", phase.noun()))
    }
}
