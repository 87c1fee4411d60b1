use crate::angles::Phase;
use crate::cli::phase::{
    build_request, exit_on_failures, print_execution_plan, read_context, PhaseInputs,
};
use crate::cli::{GlobalArgs, PipelineArgs};
use crate::provider::create_assistant;
use crate::runner::{PhaseOrchestrator, PhaseRequest};
use tracing::info;

/// Run every phase in order; each phase reads the previous phase's summary
/// as its context. A phase with failed angles does not stop the pipeline.
pub async fn execute(args: PipelineArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = global.load_config()?;
    let base = build_request(&PhaseInputs {
        feature: args.feature,
        path: Some(args.path),
        ..Default::default()
    })?;

    let orchestrator = PhaseOrchestrator::new(config.clone(), create_assistant(&config));

    if args.dry_run {
        info!("DRY RUN - no assistant calls will be made");
        for phase in Phase::all() {
            let request = request_for(phase, &base, None);
            print_execution_plan(
                &config,
                orchestrator.session(),
                &orchestrator.plan_phase(phase, &request),
            );
        }
        return Ok(());
    }

    let mut reports = Vec::new();
    let mut context: Option<String> = None;

    for phase in Phase::all() {
        println!("\n== {} ==", phase);
        let request = request_for(phase, &base, context.take());
        let report = orchestrator.run_phase(phase, &request).await?;
        context = Some(read_context(&report.summary_path)?);
        reports.push(report);
    }

    exit_on_failures(&reports);
    Ok(())
}

fn request_for(phase: Phase, base: &PhaseRequest, context: Option<String>) -> PhaseRequest {
    PhaseRequest {
        feature: base.feature.clone(),
        // assessment works from the summaries alone
        codebase_path: match phase {
            Phase::Assess => None,
            _ => base.codebase_path.clone(),
        },
        angles: None,
        context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_request_for_assess_drops_path() {
        let base = PhaseRequest {
            feature: "F".to_string(),
            codebase_path: Some(PathBuf::from("/repo")),
            ..Default::default()
        };
        let explore = request_for(Phase::Explore, &base, None);
        let assess = request_for(Phase::Assess, &base, Some("ctx".to_string()));

        assert_eq!(explore.codebase_path, Some(PathBuf::from("/repo")));
        assert!(assess.codebase_path.is_none());
        assert_eq!(assess.context.as_deref(), Some("ctx"));
    }
}
