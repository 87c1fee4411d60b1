use crate::angles::{Angle, Phase};
use crate::config::Config;
use crate::error::PhaseError;
use crate::output::{write_status, write_summary};
use crate::prompt::{build_prompt, PromptInputs};
use crate::provider::Assistant;
use crate::session::Session;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::subtask::{run_subtask, SubtaskResult, Task};

/// What a caller asks of one phase
#[derive(Debug, Clone, Default)]
pub struct PhaseRequest {
    pub feature: String,
    pub codebase_path: Option<PathBuf>,
    /// Explicit angle subset; `None` runs the whole registry
    pub angles: Option<Vec<String>>,
    /// Text of a prior phase's summary
    pub context: Option<String>,
}

/// Resolved work for a phase, computed without touching the filesystem
#[derive(Debug)]
pub struct PhasePlan {
    pub phase: Phase,
    pub angles: Vec<&'static Angle>,
    pub skipped: Vec<String>,
    pub tasks: Vec<Task>,
    pub concurrency: usize,
    pub summary_path: PathBuf,
}

#[derive(Debug)]
pub struct PhaseReport {
    pub phase: Phase,
    pub feature: String,
    /// In completion order
    pub results: Vec<SubtaskResult>,
    pub summary_path: PathBuf,
    pub duration: Duration,
}

impl PhaseReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &SubtaskResult> {
        self.results.iter().filter(|r| r.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &SubtaskResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }
}

pub struct PhaseOrchestrator {
    config: Config,
    session: Session,
    assistant: Arc<dyn Assistant>,
}

impl PhaseOrchestrator {
    pub fn new(config: Config, assistant: Arc<dyn Assistant>) -> Self {
        let session = Session::new(config.session_dir.clone());
        Self {
            config,
            session,
            assistant,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolve angles and render every prompt
    pub fn plan_phase(&self, phase: Phase, request: &PhaseRequest) -> PhasePlan {
        let (angles, skipped) = resolve_angles(phase, request.angles.as_deref());

        let inputs = PromptInputs {
            feature: &request.feature,
            codebase_path: request.codebase_path.as_deref(),
            context: request.context.as_deref(),
        };

        let tasks = angles
            .iter()
            .map(|angle| Task {
                angle_key: angle.key,
                prompt: build_prompt(phase, angle, &inputs),
                output_path: self.session.angle_output(phase, angle.key),
            })
            .collect();

        PhasePlan {
            phase,
            angles,
            skipped,
            tasks,
            concurrency: self.config.concurrency.for_phase(phase),
            summary_path: self.session.summary_path(phase),
        }
    }

    /// Fan out one sub-task per angle, wait for all of them, then write the
    /// combined summary in angle order.
    ///
    /// Sub-task failures never fail the phase; only session directory and
    /// summary write faults do.
    pub async fn run_phase(
        &self,
        phase: Phase,
        request: &PhaseRequest,
    ) -> Result<PhaseReport, PhaseError> {
        let start = Instant::now();
        let plan = self.plan_phase(phase, request);

        self.session.ensure()?;

        println!(
            "Launching {} {} sub-tasks...",
            plan.tasks.len(),
            phase.noun()
        );
        info!(
            "Running {} {} tasks with concurrency {}",
            plan.tasks.len(),
            phase,
            plan.concurrency
        );

        let results = self.dispatch(&plan, request).await?;

        let summary_path = write_summary(
            &self.session,
            phase,
            &request.feature,
            &plan.angles,
            &results,
        )?;

        let report = PhaseReport {
            phase,
            feature: request.feature.clone(),
            results,
            summary_path,
            duration: start.elapsed(),
        };

        // The status file is a convenience; the summary is what callers rely on
        match write_status(&self.session, &report) {
            Ok(path) => debug!("Wrote status: {}", path.display()),
            Err(e) => warn!("Failed to write status for {}: {}", phase, e),
        }

        println!("\nSummary written to: {}", report.summary_path.display());
        Ok(report)
    }

    async fn dispatch(
        &self,
        plan: &PhasePlan,
        request: &PhaseRequest,
    ) -> Result<Vec<SubtaskResult>, PhaseError> {
        let semaphore = Arc::new(Semaphore::new(plan.concurrency));
        let launch_delay = self.config.launch_delay();
        let timeout = self.config.timeout();

        let mut futures = FuturesUnordered::new();

        for (idx, task) in plan.tasks.iter().cloned().enumerate() {
            if idx > 0 && launch_delay > Duration::ZERO {
                sleep(launch_delay).await;
            }

            let permit = semaphore.clone().acquire_owned().await?;
            let assistant = self.assistant.clone();
            let working_dir = request.codebase_path.clone();
            let angle_key = task.angle_key;
            let output_path = task.output_path.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit; // hold until done
                run_subtask(assistant.as_ref(), &task, working_dir.as_deref(), timeout).await
            });

            futures.push(async move {
                handle.await.unwrap_or_else(|e| {
                    SubtaskResult::failed(angle_key, output_path, format!("Task panicked: {}", e))
                })
            });
        }

        let mut results = Vec::with_capacity(plan.tasks.len());
        while let Some(result) = futures.next().await {
            let mark = if result.success { "✓" } else { "✗" };
            println!("  {} {}: {}", mark, result.angle, result.output_file.display());
            if let Some(ref error) = result.error {
                warn!("{} {} failed: {}", plan.phase, result.angle, error);
            }
            results.push(result);
        }

        Ok(results)
    }
}

/// Explicit selection in caller order (unknown and repeated keys dropped
/// with a warning), or the full registry
fn resolve_angles(
    phase: Phase,
    selection: Option<&[String]>,
) -> (Vec<&'static Angle>, Vec<String>) {
    let Some(keys) = selection else {
        return (phase.angles().iter().collect(), Vec::new());
    };

    let mut angles: Vec<&'static Angle> = Vec::new();
    let mut skipped = Vec::new();
    for key in keys {
        match phase.angle(key) {
            Some(angle) if angles.iter().any(|a| a.key == angle.key) => {
                warn!("Duplicate angle '{}', skipping", key);
            }
            Some(angle) => angles.push(angle),
            None => {
                warn!("Unknown angle '{}' for {}, skipping", key, phase);
                skipped.push(key.clone());
            }
        }
    }
    (angles, skipped)
}
