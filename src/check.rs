//! Build-time validation.
//!
//! At runtime every data problem degrades quietly: malformed records are
//! dropped, dangling related terms disappear, missing strings fall back to
//! the default namespace. `check` is the gate that makes those problems
//! visible. It reports every one of them and fails if there are any, so CI
//! catches content mistakes before they ship as silently thinner pages.
//!
//! Checks, in report order:
//!
//! 1. records rejected while loading each registry
//! 2. glossary `related_terms` that don't resolve, or that point at the term itself
//! 3. required string-table keys missing from their own namespace
//! 4. string-table entries dropped for their shape
//! 5. every enumerated page resolved with strict translations

use crate::context::SeoContext;
use crate::i18n::{FallbackPolicy, I18nError};
use crate::locale::Locale;
use crate::page;
use crate::registry::{Entity, Registry};
use crate::routes;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "kebab-case")]
pub enum Issue {
    RejectedRecord {
        table: String,
        index: usize,
        slug: Option<String>,
        reason: String,
    },
    DanglingRelatedTerm {
        term: String,
        missing: String,
    },
    SelfRelatedTerm {
        term: String,
    },
    MissingTranslation {
        namespace: String,
        locale: Locale,
        key: String,
    },
    DroppedTranslation {
        entry: String,
    },
    PageFailed {
        path: String,
        error: String,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::RejectedRecord {
                table,
                index,
                slug,
                reason,
            } => write!(
                f,
                "[[{table}]] #{index} ({}) rejected: {reason}",
                slug.as_deref().unwrap_or("no slug")
            ),
            Issue::DanglingRelatedTerm { term, missing } => {
                write!(f, "term {term}: related term {missing} does not exist")
            }
            Issue::SelfRelatedTerm { term } => write!(f, "term {term}: lists itself as related"),
            Issue::MissingTranslation {
                namespace,
                locale,
                key,
            } => write!(f, "missing string {namespace}.{locale}.{key}"),
            Issue::DroppedTranslation { entry } => write!(f, "dropped string entry {entry}"),
            Issue::PageFailed { path, error } => write!(f, "page {path}: {error}"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub industries: usize,
    pub comparisons: usize,
    pub terms: usize,
    pub pages: usize,
    pub issues: Vec<Issue>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

fn rejected_records<T: Entity>(registry: &Registry<T>) -> impl Iterator<Item = Issue> + '_ {
    registry.rejected().iter().map(|r| Issue::RejectedRecord {
        table: T::TABLE.to_string(),
        index: r.index,
        slug: r.slug.clone(),
        reason: r.reason.clone(),
    })
}

/// Run every check against `ctx`'s catalog and string tables.
pub fn check(ctx: &SeoContext) -> CheckReport {
    let catalog = ctx.catalog;
    let mut issues = Vec::new();

    issues.extend(rejected_records(&catalog.industries));
    issues.extend(rejected_records(&catalog.comparisons));
    issues.extend(rejected_records(&catalog.glossary));

    for term in &catalog.glossary {
        for related in &term.related_terms {
            if *related == term.slug {
                issues.push(Issue::SelfRelatedTerm {
                    term: term.slug.clone(),
                });
            } else if !catalog.glossary.contains(related) {
                issues.push(Issue::DanglingRelatedTerm {
                    term: term.slug.clone(),
                    missing: related.clone(),
                });
            }
        }
    }

    for missing in ctx.strings.missing_keys() {
        if let I18nError::MissingKey {
            namespace,
            locale,
            key,
        } = missing
        {
            issues.push(Issue::MissingTranslation {
                namespace,
                locale,
                key,
            });
        }
    }
    issues.extend(
        ctx.strings
            .dropped()
            .iter()
            .map(|entry| Issue::DroppedTranslation {
                entry: entry.clone(),
            }),
    );

    let strict = ctx
        .clone()
        .with_strings(ctx.strings.clone().with_policy(FallbackPolicy::Strict));
    let all = routes::all_routes(catalog);
    let failures: Vec<Issue> = all
        .par_iter()
        .filter_map(|route| {
            page::resolve(&strict, route)
                .err()
                .map(|e| Issue::PageFailed {
                    path: route.locale_path(),
                    error: e.to_string(),
                })
        })
        .collect();
    issues.extend(failures);

    CheckReport {
        industries: catalog.industries.len(),
        comparisons: catalog.comparisons.len(),
        terms: catalog.glossary.len(),
        pages: all.len(),
        issues,
    }
}
