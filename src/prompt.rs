use crate::angles::{Angle, Phase};
use std::path::Path;

/// Inputs shared by every angle of a phase
#[derive(Debug, Clone, Default)]
pub struct PromptInputs<'a> {
    pub feature: &'a str,
    pub codebase_path: Option<&'a Path>,
    pub context: Option<&'a str>,
}

impl PromptInputs<'_> {
    fn path_text(&self) -> String {
        self.codebase_path
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    fn context_text(&self) -> &str {
        self.context.unwrap_or("")
    }
}

/// Render the instruction prompt for one angle of a phase
pub fn build_prompt(phase: Phase, angle: &Angle, inputs: &PromptInputs<'_>) -> String {
    match phase {
        Phase::Explore => build_explore_prompt(angle, inputs),
        Phase::Validate => build_validate_prompt(angle, inputs),
        Phase::Assess => build_assess_prompt(angle, inputs),
    }
}

fn build_explore_prompt(angle: &Angle, inputs: &PromptInputs<'_>) -> String {
    format!(
        "You are exploring a codebase to understand how to implement: {}\n\n\
        Your specific focus: {}\n\n\
        Codebase location: {}\n\n\
        Instructions:\n\
        1. Explore relevant files using view and bash tools\n\
        2. Document key findings below\n\
        3. Note: existing patterns, relevant abstractions, potential integration points, dependencies\n\n\
        Keep findings concise and actionable. \
        Structure your response as a markdown document with clear sections.",
        inputs.feature,
        angle.description,
        inputs.path_text()
    )
}

fn build_validate_prompt(angle: &Angle, inputs: &PromptInputs<'_>) -> String {
    format!(
        "You are validating an implementation approach for: {}\n\n\
        Exploration context:\n{}\n\n\
        Your validation focus: {}\n\n\
        Codebase location: {}\n\n\
        Instructions:\n\
        1. Research best practices using web search if needed\n\
        2. Validate against codebase patterns\n\
        3. Flag any concerns, risks, or open questions\n\n\
        Be critical - identify potential problems early. \
        Structure your response as a markdown document.",
        inputs.feature,
        inputs.context_text(),
        angle.description,
        inputs.path_text()
    )
}

fn build_assess_prompt(angle: &Angle, inputs: &PromptInputs<'_>) -> String {
    format!(
        "You are creating an implementation proposal for: {}\n\n\
        Context from exploration and validation:\n{}\n\n\
        Your assessment focus: {}\n\n\
        Instructions:\n\
        1. Create a concrete implementation proposal\n\
        2. Estimate effort and complexity (use T-shirt sizes: XS, S, M, L, XL)\n\
        3. Identify prerequisites and blockers\n\n\
        Structure your response with these sections:\n\
        ## Approach Summary\n\
        ## Implementation Steps\n\
        ## Effort Estimate\n\
        ## Risks and Mitigations\n\
        ## Prerequisites",
        inputs.feature,
        inputs.context_text(),
        angle.description
    )
}
