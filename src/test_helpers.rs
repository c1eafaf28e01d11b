//! Shared test utilities.
//!
//! Context builders for the page generators and small record factories for
//! tests that need a registry other than the builtin one.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let registry = glossary_registry(vec![
//!     term("alpha", "Alpha", &["beta"]),
//!     term("beta", "Beta", &[]),
//! ]);
//! let related = DeclaredEdges.related(&registry, "alpha");
//! assert_eq!(slugs_of(&related), vec!["beta"]);
//! ```

use crate::config::SiteConfig;
use crate::context::SeoContext;
use crate::i18n::FallbackPolicy;
use crate::registry::{Catalog, Entity, GlossaryTerm, Registry};

// =========================================================================
// Contexts
// =========================================================================

/// Stock config, builtin catalog and strings, lenient fallback.
pub fn ctx() -> SeoContext {
    SeoContext::default()
}

/// Like [`ctx`] but failing on the first missing translation.
pub fn strict_ctx() -> SeoContext {
    let mut config = SiteConfig::default();
    config.translations.fallback = FallbackPolicy::Strict;
    SeoContext::new(config)
}

/// Leak a catalog so it can stand in for the builtin one.
pub fn leak_catalog(catalog: Catalog) -> &'static Catalog {
    Box::leak(Box::new(catalog))
}

// =========================================================================
// Record factories
// =========================================================================

/// A glossary term with placeholder prose.
pub fn term(slug: &str, name: &str, related: &[&str]) -> GlossaryTerm {
    GlossaryTerm {
        slug: slug.to_string(),
        name: name.to_string(),
        description: format!("{name} in one line."),
        definition: format!("{name} is a test term."),
        technical_explanation: String::new(),
        why_it_matters: format!("{name} matters in tests."),
        common_mistakes: vec![format!("Confusing {name} with something else")],
        related_terms: related.iter().map(|s| s.to_string()).collect(),
        code_example: None,
        schema_type: None,
    }
}

pub fn glossary_registry(terms: Vec<GlossaryTerm>) -> Registry<GlossaryTerm> {
    Registry::from_records(terms)
}

// =========================================================================
// Extractors
// =========================================================================

/// Slugs of resolved entities, in order.
pub fn slugs_of<'a, T: Entity>(items: &[&'a T]) -> Vec<&'a str> {
    items.iter().map(|&e| e.slug()).collect()
}
