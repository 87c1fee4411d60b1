use crate::error::{OutputError, ProviderError};
use crate::provider::Assistant;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

/// One unit of work: a rendered prompt and where its output lands
#[derive(Debug, Clone)]
pub struct Task {
    pub angle_key: &'static str,
    pub prompt: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubtaskResult {
    pub angle: String,
    pub output_file: PathBuf,
    pub success: bool,
    pub error: Option<String>,
    pub duration: Duration,
}

impl SubtaskResult {
    pub fn failed(angle: &str, output_file: PathBuf, error: String) -> Self {
        Self {
            angle: angle.to_string(),
            output_file,
            success: false,
            error: Some(error),
            duration: Duration::ZERO,
        }
    }
}

/// Run one task through the assistant and persist whatever it printed.
///
/// The output file is always written, possibly empty, even when the process
/// fails, times out or cannot be launched. Every failure is folded into the
/// returned result; nothing is retried.
pub async fn run_subtask(
    assistant: &dyn Assistant,
    task: &Task,
    working_dir: Option<&Path>,
    timeout: Duration,
) -> SubtaskResult {
    let start = Instant::now();
    debug!("Running {} via {}", task.angle_key, assistant.name());

    let outcome = assistant.execute(&task.prompt, working_dir, timeout).await;
    if let Ok(ref output) = outcome {
        debug!(
            "{} exited with {:?} after {:?}",
            task.angle_key, output.exit_code, output.duration
        );
    }

    let (stdout, mut error) = match outcome {
        Ok(output) if output.timed_out => {
            (output.stdout, Some(ProviderError::Timeout(timeout).to_string()))
        }
        Ok(output) if output.success() => (output.stdout, None),
        Ok(output) => {
            let err = ProviderError::NonZeroExit {
                code: output.exit_code.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            };
            (output.stdout, Some(err.to_string()))
        }
        Err(e) => (String::new(), Some(e.to_string())),
    };

    if let Err(e) = tokio::fs::write(&task.output_path, stdout.as_bytes()).await {
        let write_err = OutputError::Write {
            path: task.output_path.clone(),
            source: e,
        }
        .to_string();
        error = Some(match error {
            Some(prev) => format!("{}; {}", prev, write_err),
            None => write_err,
        });
    }

    SubtaskResult {
        angle: task.angle_key.to_string(),
        output_file: task.output_path.clone(),
        success: error.is_none(),
        error,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAssistant, Reply};
    use tempfile::TempDir;

    fn task(dir: &Path, key: &'static str) -> Task {
        Task {
            angle_key: key,
            prompt: format!("focus {}", key),
            output_path: dir.join(format!("explore-{}.md", key)),
        }
    }

    #[tokio::test]
    async fn test_success_writes_output() {
        let dir = TempDir::new().unwrap();
        let fake = FakeAssistant::new(vec![Reply::ok("focus api", "api notes")]);
        let task = task(dir.path(), "api");

        let result = run_subtask(&fake, &task, None, Duration::from_secs(5)).await;

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.angle, "api");
        assert_eq!(std::fs::read_to_string(&task.output_path).unwrap(), "api notes");
    }

    #[tokio::test]
    async fn test_nonzero_exit_still_writes_output() {
        let dir = TempDir::new().unwrap();
        let fake = FakeAssistant::new(vec![Reply::ok("focus data", "half done").exit(2)]);
        let task = task(dir.path(), "data");

        let result = run_subtask(&fake, &task, None, Duration::from_secs(5)).await;

        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("exit code 2"), "{}", error);
        assert!(error.contains("scripted failure"), "{}", error);
        assert_eq!(std::fs::read_to_string(&task.output_path).unwrap(), "half done");
    }

    #[tokio::test]
    async fn test_timeout_reports_message_and_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let fake = FakeAssistant::new(vec![Reply::ok("focus testing", "").timeout()]);
        let task = task(dir.path(), "testing");

        let result = run_subtask(&fake, &task, None, Duration::from_secs(300)).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Execution timed out after 300s")
        );
        assert_eq!(std::fs::read_to_string(&task.output_path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_launch_fault_is_captured() {
        let dir = TempDir::new().unwrap();
        let fake = FakeAssistant::new(vec![]);
        let task = task(dir.path(), "similar");

        let result = run_subtask(&fake, &task, None, Duration::from_secs(5)).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("no scripted reply"));
        assert!(task.output_path.exists());
    }

    #[tokio::test]
    async fn test_unwritable_output_is_failure() {
        let dir = TempDir::new().unwrap();
        let fake = FakeAssistant::new(vec![Reply::ok("focus api", "notes")]);
        let mut task = task(dir.path(), "api");
        task.output_path = dir.path().join("missing-dir").join("explore-api.md");

        let result = run_subtask(&fake, &task, None, Duration::from_secs(5)).await;

        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("Failed to write"));
    }
}
