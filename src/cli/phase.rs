use crate::angles::Phase;
use crate::cli::{AssessArgs, ExploreArgs, GlobalArgs, ValidateArgs};
use crate::config::Config;
use crate::provider::create_assistant;
use crate::runner::{PhaseOrchestrator, PhasePlan, PhaseReport, PhaseRequest};
use crate::session::Session;
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Inputs common to the three phase subcommands
#[derive(Debug, Clone, Default)]
pub struct PhaseInputs {
    pub feature: String,
    pub path: Option<PathBuf>,
    pub context: Option<PathBuf>,
    pub angles: Option<Vec<String>>,
    pub concurrency: Option<usize>,
    pub dry_run: bool,
}

impl From<ExploreArgs> for PhaseInputs {
    fn from(args: ExploreArgs) -> Self {
        Self {
            feature: args.feature,
            path: Some(args.path),
            context: None,
            angles: args.angles,
            concurrency: args.dispatch.concurrency,
            dry_run: args.dispatch.dry_run,
        }
    }
}

impl From<ValidateArgs> for PhaseInputs {
    fn from(args: ValidateArgs) -> Self {
        Self {
            feature: args.feature,
            path: Some(args.path),
            context: args.context,
            angles: args.angles,
            concurrency: args.dispatch.concurrency,
            dry_run: args.dispatch.dry_run,
        }
    }
}

impl From<AssessArgs> for PhaseInputs {
    fn from(args: AssessArgs) -> Self {
        Self {
            feature: args.feature,
            path: None,
            context: args.context,
            angles: args.angles,
            concurrency: args.dispatch.concurrency,
            dry_run: args.dispatch.dry_run,
        }
    }
}

pub async fn execute(
    phase: Phase,
    inputs: PhaseInputs,
    global: &GlobalArgs,
) -> anyhow::Result<()> {
    let mut config = global.load_config()?;
    if let Some(concurrency) = inputs.concurrency {
        config.concurrency.set_for_phase(phase, concurrency);
        config.validate().context("Invalid configuration")?;
    }

    // Fatal input errors abort before anything is dispatched
    let request = build_request(&inputs)?;

    let orchestrator = PhaseOrchestrator::new(config.clone(), create_assistant(&config));

    if inputs.dry_run {
        info!("DRY RUN - no assistant calls will be made");
        print_execution_plan(
            &config,
            orchestrator.session(),
            &orchestrator.plan_phase(phase, &request),
        );
        return Ok(());
    }

    let report = orchestrator.run_phase(phase, &request).await?;
    exit_on_failures(&[report]);
    Ok(())
}

pub fn build_request(inputs: &PhaseInputs) -> anyhow::Result<PhaseRequest> {
    if inputs.feature.trim().is_empty() {
        bail!("Feature description must not be empty");
    }

    if let Some(ref path) = inputs.path {
        if !path.is_dir() {
            bail!("Codebase path {} is not a directory", path.display());
        }
    }

    let context = inputs
        .context
        .as_deref()
        .map(read_context)
        .transpose()?;

    Ok(PhaseRequest {
        feature: inputs.feature.clone(),
        codebase_path: inputs.path.clone(),
        angles: inputs.angles.clone(),
        context,
    })
}

pub fn read_context(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file {}", path.display()))
}

/// Exit 1 when any sub-task failed; the summaries were already written
pub fn exit_on_failures(reports: &[PhaseReport]) {
    for report in reports {
        info!(
            "{} finished in {:.1}s: {} succeeded, {} failed",
            report.phase,
            report.duration.as_secs_f64(),
            report.succeeded().count(),
            report.failed().count()
        );
    }

    if let Some(message) = failure_message(reports) {
        error!("{}", message);
        std::process::exit(1);
    }
}

fn failure_message(reports: &[PhaseReport]) -> Option<String> {
    if reports.iter().all(PhaseReport::all_succeeded) {
        return None;
    }
    let total: usize = reports.iter().map(|r| r.results.len()).sum();
    let failed: usize = reports.iter().map(|r| r.failed().count()).sum();
    Some(format!("{} of {} sub-tasks failed", failed, total))
}

pub fn print_execution_plan(config: &Config, session: &Session, plan: &PhasePlan) {
    println!("\n=== {} Plan ===\n", crate::output::title_case(plan.phase.noun()));
    println!("Session dir: {:?}", session.root());
    println!("Model: {}", config.model);
    println!("Concurrency: {}", plan.concurrency);
    println!("Timeout: {}s", config.timeout_sec);

    println!("\nAngles to run:");
    for task in &plan.tasks {
        println!("  - {} -> {}", task.angle_key, task.output_path.display());
    }
    if !plan.skipped.is_empty() {
        println!("\nSkipped (unknown): {:?}", plan.skipped);
    }
    println!("\nSummary: {}", plan.summary_path.display());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::SubtaskResult;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_build_request_reads_context() {
        let dir = TempDir::new().unwrap();
        let context = dir.path().join("exploration-summary.md");
        std::fs::write(&context, "# Exploration Summary: X").unwrap();

        let inputs = PhaseInputs {
            feature: "X".to_string(),
            path: Some(dir.path().to_path_buf()),
            context: Some(context),
            ..Default::default()
        };
        let request = build_request(&inputs).unwrap();

        assert_eq!(request.context.as_deref(), Some("# Exploration Summary: X"));
        assert_eq!(request.codebase_path.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_missing_context_is_fatal() {
        let inputs = PhaseInputs {
            feature: "X".to_string(),
            context: Some(PathBuf::from("/nonexistent/summary.md")),
            ..Default::default()
        };
        let err = build_request(&inputs).unwrap_err();
        assert!(err.to_string().contains("Failed to read context file"));
    }

    #[test]
    fn test_missing_codebase_is_fatal() {
        let inputs = PhaseInputs {
            feature: "X".to_string(),
            path: Some(PathBuf::from("/nonexistent/repo")),
            ..Default::default()
        };
        assert!(build_request(&inputs).is_err());
    }

    fn report(phase: Phase, outcomes: &[(&str, bool)]) -> PhaseReport {
        PhaseReport {
            phase,
            feature: "X".to_string(),
            results: outcomes
                .iter()
                .map(|(angle, success)| SubtaskResult {
                    angle: angle.to_string(),
                    output_file: PathBuf::from(format!("{}-{}.md", phase, angle)),
                    success: *success,
                    error: (!success).then(|| "boom".to_string()),
                    duration: Duration::ZERO,
                })
                .collect(),
            summary_path: PathBuf::from("summary.md"),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_no_failure_message_when_all_succeeded() {
        let reports = [
            report(Phase::Explore, &[("api", true), ("data", true)]),
            report(Phase::Assess, &[("mvp", true)]),
        ];
        assert!(failure_message(&reports).is_none());
    }

    #[test]
    fn test_failure_message_counts_across_phases() {
        let reports = [
            report(Phase::Explore, &[("api", true), ("data", false)]),
            report(Phase::Validate, &[("edges", false), ("patterns", true)]),
        ];
        assert_eq!(
            failure_message(&reports).as_deref(),
            Some("2 of 4 sub-tasks failed")
        );
    }

    #[test]
    fn test_empty_feature_is_fatal() {
        let inputs = PhaseInputs {
            feature: "  ".to_string(),
            ..Default::default()
        };
        assert!(build_request(&inputs).is_err());
    }
}
