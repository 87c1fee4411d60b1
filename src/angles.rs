/// A named sub-focus within a phase; each one becomes an independent sub-task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Angle {
    pub key: &'static str,
    pub description: &'static str,
}

const EXPLORE_ANGLES: &[Angle] = &[
    Angle {
        key: "architecture",
        description: "Architecture - overall structure, module boundaries, data flow patterns",
    },
    Angle {
        key: "similar",
        description: "Similar features - existing features with comparable patterns to reference",
    },
    Angle {
        key: "data",
        description: "Data layer - models, schemas, database interactions, state management",
    },
    Angle {
        key: "api",
        description: "API surface - endpoints, interfaces, contracts that would be affected",
    },
    Angle {
        key: "testing",
        description: "Testing patterns - how similar features are tested, test infrastructure",
    },
];

const VALIDATE_ANGLES: &[Angle] = &[
    Angle {
        key: "patterns",
        description: "Pattern alignment - does the approach fit existing codebase patterns?",
    },
    Angle {
        key: "research",
        description:
            "Technical research - best practices, library options, security considerations",
    },
    Angle {
        key: "edges",
        description: "Edge cases - error handling, failure modes, boundary conditions",
    },
    Angle {
        key: "performance",
        description: "Performance - scalability concerns, potential bottlenecks",
    },
];

const ASSESS_ANGLES: &[Angle] = &[
    Angle {
        key: "mvp",
        description: "MVP approach - minimum viable implementation, fastest path",
    },
    Angle {
        key: "robust",
        description: "Robust approach - production-ready, handles edge cases",
    },
    Angle {
        key: "alternative",
        description: "Alternative approach - different architecture or pattern",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Phase {
    Explore,
    Validate,
    Assess,
}

impl Phase {
    pub fn all() -> [Phase; 3] {
        [Phase::Explore, Phase::Validate, Phase::Assess]
    }

    /// Registry for this phase, in declaration order
    pub fn angles(self) -> &'static [Angle] {
        match self {
            Phase::Explore => EXPLORE_ANGLES,
            Phase::Validate => VALIDATE_ANGLES,
            Phase::Assess => ASSESS_ANGLES,
        }
    }

    pub fn angle(self, key: &str) -> Option<&'static Angle> {
        self.angles().iter().find(|a| a.key == key)
    }

    /// Short name used for subcommands and per-angle file prefixes
    pub fn name(self) -> &'static str {
        match self {
            Phase::Explore => "explore",
            Phase::Validate => "validate",
            Phase::Assess => "assess",
        }
    }

    /// Noun used for the combined summary file and its title
    pub fn noun(self) -> &'static str {
        match self {
            Phase::Explore => "exploration",
            Phase::Validate => "validation",
            Phase::Assess => "assessment",
        }
    }

    /// Suffix appended to each section heading of the summary
    pub fn heading_suffix(self) -> &'static str {
        match self {
            Phase::Assess => " Approach",
            _ => "",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
