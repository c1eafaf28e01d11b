//! Head-to-head comparisons between Ai.Rio and an alternative.

use super::{Entity, Registry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of alternative a comparison is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonType {
    DiyTool,
    Platform,
    Service,
    Hiring,
    Agency,
    Opensource,
}

impl ComparisonType {
    pub const ALL: [ComparisonType; 6] = [
        ComparisonType::DiyTool,
        ComparisonType::Platform,
        ComparisonType::Service,
        ComparisonType::Hiring,
        ComparisonType::Agency,
        ComparisonType::Opensource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonType::DiyTool => "diy-tool",
            ComparisonType::Platform => "platform",
            ComparisonType::Service => "service",
            ComparisonType::Hiring => "hiring",
            ComparisonType::Agency => "agency",
            ComparisonType::Opensource => "opensource",
        }
    }
}

impl fmt::Display for ComparisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value for the alternative next to the same value for Ai.Rio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contrast {
    pub alternative: String,
    pub ai_rio: String,
}

/// One row of the feature table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureRow {
    pub feature: String,
    pub alternative: String,
    pub ai_rio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonData {
    pub slug: String,
    /// Name of the alternative ("Build In-House", "Lago", ...).
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ComparisonType,
    pub when_to_choose_alternative: Vec<String>,
    pub when_to_choose_ai_rio: Vec<String>,
    pub cost: Contrast,
    pub timeline: Contrast,
    pub features: Vec<FeatureRow>,
    pub alternative_pros: Vec<String>,
    pub alternative_cons: Vec<String>,
    pub ai_rio_pros: Vec<String>,
    pub ai_rio_cons: Vec<String>,
    pub verdict: String,
}

impl Entity for ComparisonData {
    const TABLE: &'static str = "comparison";

    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Registry<ComparisonData> {
    /// Comparisons of the given kind, in registry order.
    pub fn by_type(&self, kind: ComparisonType) -> Vec<&ComparisonData> {
        self.iter().filter(|c| c.kind == kind).collect()
    }
}
