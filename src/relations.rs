//! Cross-references between entities.
//!
//! Two policies, chosen per entity type:
//!
//! - [`DeclaredEdges`] follows slugs an entity lists explicitly (glossary
//!   `related_terms`). Order is the declared order; slugs that don't resolve
//!   are dropped without comment.
//! - [`OthersCapped`] returns every other entity in registry order, capped.
//!   Used for industries and comparisons, which carry no authored links.
//!
//! Neither scores similarity. Callers truncate declared edges to their own
//! display count.

use crate::registry::{Catalog, ComparisonData, Entity, GlossaryTerm, IndustryData, Registry};
use std::collections::BTreeMap;

/// Picks entities related to the one identified by `slug`.
pub trait RelatedResolver<T: Entity> {
    fn related<'r>(&self, registry: &'r Registry<T>, slug: &str) -> Vec<&'r T>;
}

/// An entity that declares its related entities by slug.
pub trait Linked: Entity {
    fn related_slugs(&self) -> &[String];
}

impl Linked for GlossaryTerm {
    fn related_slugs(&self) -> &[String] {
        &self.related_terms
    }
}

/// Follow declared slugs, keeping only those that resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredEdges;

impl<T: Linked> RelatedResolver<T> for DeclaredEdges {
    fn related<'r>(&self, registry: &'r Registry<T>, slug: &str) -> Vec<&'r T> {
        let Some(entity) = registry.get(slug) else {
            return Vec::new();
        };
        entity
            .related_slugs()
            .iter()
            .filter_map(|s| registry.get(s))
            .collect()
    }
}

/// Every other entity, in registry order, at most `cap`.
#[derive(Debug, Clone, Copy)]
pub struct OthersCapped {
    pub cap: usize,
}

impl<T: Entity> RelatedResolver<T> for OthersCapped {
    fn related<'r>(&self, registry: &'r Registry<T>, slug: &str) -> Vec<&'r T> {
        registry
            .iter()
            .filter(|e| e.slug() != slug)
            .take(self.cap)
            .collect()
    }
}

/// Resolved related terms for a glossary slug, uncapped.
pub fn get_related_terms(slug: &str) -> Vec<&'static GlossaryTerm> {
    DeclaredEdges.related(&Catalog::builtin().glossary, slug)
}

pub fn related_industries(slug: &str, cap: usize) -> Vec<&'static IndustryData> {
    OthersCapped { cap }.related(&Catalog::builtin().industries, slug)
}

pub fn related_comparisons(slug: &str, cap: usize) -> Vec<&'static ComparisonData> {
    OthersCapped { cap }.related(&Catalog::builtin().comparisons, slug)
}

/// Group terms by the uppercase first character of their name.
///
/// Buckets are ordered by letter; terms keep registry order inside a bucket.
/// Terms with an empty name are left out.
pub fn group_by_initial(registry: &Registry<GlossaryTerm>) -> BTreeMap<char, Vec<&GlossaryTerm>> {
    let mut groups: BTreeMap<char, Vec<&GlossaryTerm>> = BTreeMap::new();
    for term in registry {
        let Some(first) = term.name.chars().next() else {
            continue;
        };
        let initial = first.to_uppercase().next().unwrap_or(first);
        groups.entry(initial).or_default().push(term);
    }
    groups
}

pub fn get_terms_by_category() -> BTreeMap<char, Vec<&'static GlossaryTerm>> {
    group_by_initial(&Catalog::builtin().glossary)
}
