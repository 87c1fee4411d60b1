use crate::error::OutputError;
use crate::runner::PhaseReport;
use crate::session::Session;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct PhaseStatus {
    pub timestamp: String,
    pub phase: String,
    pub feature: String,
    pub duration_sec: f64,
    pub tasks: Vec<TaskStatus>,
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    pub summary: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStatus {
    pub angle: String,
    pub output_file: PathBuf,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_sec: f64,
}

/// Overwrite `{noun}-status.json` for the phase of this report
pub fn write_status(session: &Session, report: &PhaseReport) -> Result<PathBuf, OutputError> {
    let status = build_status(report);
    let path = session.status_path(report.phase);
    let json = serde_json::to_string_pretty(&status)?;
    fs::write(&path, json).map_err(|e| OutputError::Write {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

fn build_status(report: &PhaseReport) -> PhaseStatus {
    let tasks = report
        .results
        .iter()
        .map(|r| TaskStatus {
            angle: r.angle.clone(),
            output_file: r.output_file.clone(),
            success: r.success,
            error: r.error.clone(),
            duration_sec: r.duration.as_secs_f64(),
        })
        .collect();

    PhaseStatus {
        timestamp: Utc::now().to_rfc3339(),
        phase: report.phase.to_string(),
        feature: report.feature.clone(),
        duration_sec: report.duration.as_secs_f64(),
        tasks,
        succeeded: report.succeeded().map(|r| r.angle.clone()).collect(),
        failed: report.failed().map(|r| r.angle.clone()).collect(),
        summary: report.summary_path.clone(),
    }
}
