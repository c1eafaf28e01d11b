//! Glossary of billing terms.
//!
//! Terms are the one entity with authored relationships: `related_terms`
//! lists slugs of other terms, resolved by [`crate::relations`].

use super::{Entity, Registry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeExample {
    pub language: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlossaryTerm {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub definition: String,
    pub technical_explanation: String,
    pub why_it_matters: String,
    pub common_mistakes: Vec<String>,
    /// Slugs of related terms, in display order. May reference terms that
    /// don't exist; those are dropped on resolution.
    pub related_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<CodeExample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
}

impl Entity for GlossaryTerm {
    const TABLE: &'static str = "term";

    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Registry<GlossaryTerm> {
    /// Case-insensitive substring match over name, definition and
    /// description. All matches, registry order, unranked.
    pub fn search(&self, query: &str) -> Vec<&GlossaryTerm> {
        let needle = query.to_lowercase();
        self.iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle)
                    || t.definition.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
