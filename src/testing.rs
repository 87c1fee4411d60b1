//! Shared test helpers

use crate::error::ProviderError;
use crate::provider::{Assistant, ProviderOutput};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Write an executable shell script standing in for the assistant CLI
#[cfg(unix)]
pub fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Scripted response for prompts containing a marker
#[derive(Clone)]
pub struct Reply {
    pub marker: &'static str,
    pub stdout: &'static str,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(marker: &'static str, stdout: &'static str) -> Self {
        Self {
            marker,
            stdout,
            exit_code: Some(0),
            timed_out: false,
            delay: Duration::ZERO,
        }
    }

    pub fn exit(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    pub fn timeout(mut self) -> Self {
        self.exit_code = None;
        self.timed_out = true;
        self
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// In-process assistant answering by prompt marker; unmatched prompts fail to launch
pub struct FakeAssistant {
    replies: Vec<Reply>,
    running: AtomicUsize,
    pub max_running: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeAssistant {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            running: AtomicUsize::new(0),
            max_running: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Assistant for FakeAssistant {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn execute(
        &self,
        prompt: &str,
        _working_dir: Option<&Path>,
        _timeout: Duration,
    ) -> Result<ProviderOutput, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(now, Ordering::SeqCst);

        let reply = self.replies.iter().find(|r| prompt.contains(r.marker)).cloned();
        if let Some(ref reply) = reply {
            tokio::time::sleep(reply.delay).await;
        }
        self.running.fetch_sub(1, Ordering::SeqCst);

        let reply = reply.ok_or_else(|| {
            ProviderError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no scripted reply",
            ))
        })?;
        Ok(ProviderOutput {
            stdout: reply.stdout.to_string(),
            stderr: if reply.exit_code == Some(0) {
                String::new()
            } else {
                "scripted failure".to_string()
            },
            duration: reply.delay,
            exit_code: reply.exit_code,
            timed_out: reply.timed_out,
        })
    }
}
