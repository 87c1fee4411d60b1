use crate::angles::{Angle, Phase};
use crate::error::OutputError;
use crate::runner::SubtaskResult;
use crate::session::Session;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Captured output of one angle, ready to be placed in the summary
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub angle_key: String,
    pub body: String,
}

/// Render the combined document. Sections appear in the order given.
pub fn render_summary(phase: Phase, feature: &str, sections: &[Section]) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# {} Summary: {}\n\n",
        title_case(phase.noun()),
        feature
    ));

    for section in sections {
        md.push_str(&format!(
            "## {}{}\n\n",
            title_case(&section.angle_key),
            phase.heading_suffix()
        ));
        md.push_str(&section.body);
        md.push_str(SECTION_SEPARATOR);
    }

    md
}

/// Collect the sections of succeeded angles in declaration order, then
/// overwrite the phase summary file
pub fn write_summary(
    session: &Session,
    phase: Phase,
    feature: &str,
    angles: &[&Angle],
    results: &[SubtaskResult],
) -> Result<PathBuf, OutputError> {
    let mut sections = Vec::new();

    for angle in angles {
        let Some(result) = results.iter().find(|r| r.angle == angle.key) else {
            continue;
        };
        if !result.success {
            continue;
        }
        match fs::read_to_string(&result.output_file) {
            Ok(body) => sections.push(Section {
                angle_key: angle.key.to_string(),
                body,
            }),
            Err(e) => warn!(
                "Skipping {}: cannot read {}: {}",
                angle.key,
                result.output_file.display(),
                e
            ),
        }
    }

    let path = session.summary_path(phase);
    let md = render_summary(phase, feature, &sections);
    fs::write(&path, md).map_err(|e| OutputError::Write {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn section(key: &str, body: &str) -> Section {
        Section {
            angle_key: key.to_string(),
            body: body.to_string(),
        }
    }

    fn result(session: &Session, key: &str, success: bool) -> SubtaskResult {
        SubtaskResult {
            angle: key.to_string(),
            output_file: session.angle_output(Phase::Explore, key),
            success,
            error: if success { None } else { Some("boom".to_string()) },
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("api"), "Api");
        assert_eq!(title_case("exploration"), "Exploration");
        assert_eq!(title_case("edge-cases"), "Edge-Cases");
        assert_eq!(title_case("MVP"), "Mvp");
    }

    #[test]
    fn test_render_single_section() {
        let md = render_summary(
            Phase::Explore,
            "OAuth authentication",
            &[section("api", "ok")],
        );
        assert_eq!(
            md,
            "# Exploration Summary: OAuth authentication\n\n## Api\n\nok\n\n---\n\n"
        );
    }

    #[test]
    fn test_render_assess_headings() {
        let md = render_summary(Phase::Assess, "Search", &[section("mvp", "plan")]);
        assert!(md.starts_with("# Assessment Summary: Search\n\n"));
        assert!(md.contains("## Mvp Approach\n\nplan"));
    }

    #[test]
    fn test_render_no_sections() {
        let md = render_summary(Phase::Validate, "Search", &[]);
        assert_eq!(md, "# Validation Summary: Search\n\n");
    }

    #[test]
    fn test_write_summary_follows_angle_order_and_skips_failures() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(dir.path());
        for (key, body) in [("api", "API"), ("data", "DATA"), ("testing", "TESTS")] {
            fs::write(session.angle_output(Phase::Explore, key), body).unwrap();
        }

        let angles: Vec<&Angle> = ["testing", "data", "api"]
            .iter()
            .map(|k| Phase::Explore.angle(k).unwrap())
            .collect();
        // completion order differs from angle order
        let results = vec![
            result(&session, "api", true),
            result(&session, "data", false),
            result(&session, "testing", true),
        ];

        let path = write_summary(&session, Phase::Explore, "Feature", &angles, &results).unwrap();
        let md = fs::read_to_string(path).unwrap();

        let testing = md.find("## Testing").unwrap();
        let api = md.find("## Api").unwrap();
        assert!(testing < api);
        assert!(!md.contains("## Data"));
        assert!(!md.contains("DATA"));
    }
}
