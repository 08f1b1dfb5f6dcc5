use serde::{Deserialize, Serialize};

/// Breadth of a replacement. Variant order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    /// One slot of one template.
    Individual,
    /// Every matching slot of one template.
    Grouped,
    /// Every matching slot of every loaded template of a kind.
    Global,
}

impl Scope {
    /// Highest priority first.
    pub const PRIORITY: [Scope; 3] = [Scope::Individual, Scope::Grouped, Scope::Global];

    /// Position in [`Scope::PRIORITY`]; lower is stronger.
    pub fn rank(self) -> usize {
        match self {
            Scope::Individual => 0,
            Scope::Grouped => 1,
            Scope::Global => 2,
        }
    }

    /// Global replacements only move and rotate; narrower scopes may also
    /// rewrite spawn probability.
    pub fn supports_probability(self) -> bool {
        !matches!(self, Scope::Global)
    }

    /// Scopes weaker than this one, strongest first.
    pub fn lower(self) -> &'static [Scope] {
        match self {
            Scope::Individual => &[Scope::Grouped, Scope::Global],
            Scope::Grouped => &[Scope::Global],
            Scope::Global => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scope::Individual => "individual",
            Scope::Grouped => "grouped",
            Scope::Global => "global",
        }
    }
}
