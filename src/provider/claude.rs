use super::{Assistant, ProviderOutput};
use crate::error::ProviderError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::timeout as tokio_timeout;
use tracing::{debug, warn};

/// How long to keep draining pipes after the child exited or was killed.
/// A grandchild can hold stdout open past the child's death; its drain is
/// aborted once this elapses.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

type Buffer = Arc<Mutex<Vec<u8>>>;

pub struct ClaudeRunner {
    pub binary: PathBuf,
    pub model: String,
}

impl ClaudeRunner {
    fn command(&self, prompt: &str, working_dir: Option<&Path>) -> Command {
        // Build command - use string for PATH lookup if not an absolute/relative path
        let binary_str = self.binary.to_string_lossy();
        let mut cmd = if binary_str.contains('/') || binary_str.contains('\\') {
            Command::new(&self.binary)
        } else {
            Command::new(binary_str.as_ref())
        };

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        cmd.arg("--model")
            .arg(&self.model)
            .arg("--print")
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd
    }
}

#[async_trait]
impl Assistant for ClaudeRunner {
    fn name(&self) -> &'static str {
        "claude_cli"
    }

    async fn execute(
        &self,
        prompt: &str,
        working_dir: Option<&Path>,
        timeout: Duration,
    ) -> Result<ProviderOutput, ProviderError> {
        let start = std::time::Instant::now();

        let mut child = self
            .command(prompt, working_dir)
            .spawn()
            .map_err(|e| ProviderError::Spawn {
                binary: self.binary.display().to_string(),
                source: e,
            })?;

        // Drain both pipes while the child runs so partial output survives a timeout
        let stdout_buf: Buffer = Arc::default();
        let stderr_buf: Buffer = Arc::default();
        let drains: Vec<_> = [
            child
                .stdout
                .take()
                .map(|out| tokio::spawn(drain(out, stdout_buf.clone()))),
            child
                .stderr
                .take()
                .map(|err| tokio::spawn(drain(err, stderr_buf.clone()))),
        ]
        .into_iter()
        .flatten()
        .collect();

        let waited = tokio_timeout(timeout, child.wait()).await;
        let (exit_code, timed_out) = match waited {
            Ok(status) => (status?.code(), false),
            Err(_) => {
                warn!("Assistant timed out after {:?}, killing process", timeout);
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill timed out process: {}", e);
                }
                (None, true)
            }
        };

        let abandoned = join_drains(drains, DRAIN_GRACE).await;
        if abandoned > 0 {
            debug!(
                "{} pipe(s) still open after process exit, keeping captured output",
                abandoned
            );
        }

        Ok(ProviderOutput {
            stdout: take_text(&stdout_buf),
            stderr: take_text(&stderr_buf),
            duration: start.elapsed(),
            exit_code,
            timed_out,
        })
    }
}

/// Wait up to `grace` for each drain task, aborting those still reading.
/// Returns how many were aborted.
async fn join_drains(handles: Vec<JoinHandle<std::io::Result<()>>>, grace: Duration) -> usize {
    let mut aborted = 0;
    for mut handle in handles {
        match tokio_timeout(grace, &mut handle).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => debug!("Pipe read failed: {}", e),
            Ok(Err(e)) => debug!("Pipe drain task failed: {}", e),
            Err(_) => {
                // a surviving grandchild holds the pipe open
                handle.abort();
                aborted += 1;
            }
        }
    }
    aborted
}

async fn drain<R: AsyncRead + Unpin>(mut reader: R, sink: Buffer) -> std::io::Result<()> {
    let mut chunk = [0u8; 8192];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        sink.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(&chunk[..n]);
    }
}

fn take_text(buf: &Buffer) -> String {
    let bytes = buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    String::from_utf8_lossy(&bytes).into_owned()
}
