//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what a page *is* (its title, its path) and shows
//! supporting detail on indented context lines. Every list entry follows the
//! same two-level pattern:
//!
//! 1. **Header line**: positional index + identity
//! 2. **Context lines**: indented `URL:`, `Description:`, etc.
//!
//! # Output Format
//!
//! ## Routes
//!
//! ```text
//! Comparison pages (24)
//! 001 /compare/build-in-house
//! 002 /compare/stripe-billing
//! ...
//! ```
//!
//! ## Page
//!
//! ```text
//! Ai.Rio vs Lago: Comparison & Review
//!     URL: https://ai.rio.br/compare/lago
//!     Description: Compare Ai.Rio and Lago on cost, timeline and featur...
//!     Alternates:
//!         en → https://ai.rio.br/compare/lago
//!         es → https://ai.rio.br/es/compare/lago
//!     Structured data: Article, BreadcrumbList, FAQPage
//!     Related:
//!         001 Build In-House → https://ai.rio.br/compare/build-in-house
//! ```
//!
//! ## Check
//!
//! ```text
//! Content
//!     8 industries, 8 comparisons, 15 terms
//!     117 pages
//! Issues (1)
//!     term mrr: related term arpu does not exist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::check::CheckReport;
use crate::emit::BuildReport;
use crate::page::PageDescriptor;
use crate::registry::GlossaryTerm;
use crate::routes::{Route, RouteKind};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// routes
// ============================================================================

/// Routes grouped by kind, in enumeration order within each group.
pub fn format_routes(routes: &[Route]) -> Vec<String> {
    let mut lines = Vec::new();
    for kind in RouteKind::ALL {
        let group: Vec<&Route> = routes.iter().filter(|r| r.kind() == kind).collect();
        if group.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{} pages ({})", capitalize(kind.as_str()), group.len()));
        for (i, route) in group.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), route.locale_path()));
        }
    }
    lines
}

pub fn print_routes(routes: &[Route]) {
    print_lines(format_routes(routes));
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// page
// ============================================================================

pub fn format_page(page: &PageDescriptor) -> Vec<String> {
    let m = &page.metadata;
    let mut lines = vec![
        m.title.clone(),
        format!("{}URL: {}", indent(1), page.url),
        format!("{}Description: {}", indent(1), truncate_desc(&m.description, 60)),
        format!("{}Keywords: {}", indent(1), m.keywords.join(", ")),
        format!("{}Alternates:", indent(1)),
    ];
    for (hreflang, url) in &m.alternate_urls {
        lines.push(format!("{}{} \u{2192} {}", indent(2), hreflang, url));
    }

    let types: Vec<&str> = page
        .structured_data
        .iter()
        .filter_map(|block| block["@type"].as_str())
        .collect();
    lines.push(format!("{}Structured data: {}", indent(1), types.join(", ")));

    if !page.related.is_empty() {
        lines.push(format!("{}Related:", indent(1)));
        for (i, link) in page.related.iter().enumerate() {
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(2),
                format_index(i + 1),
                link.name,
                link.url
            ));
        }
    }
    lines
}

pub fn print_page(page: &PageDescriptor) {
    print_lines(format_page(page));
}

// ============================================================================
// search
// ============================================================================

pub fn format_search(query: &str, terms: &[&GlossaryTerm]) -> Vec<String> {
    if terms.is_empty() {
        return vec![format!("No glossary terms match \"{}\"", query)];
    }
    let mut lines = Vec::new();
    for (i, term) in terms.iter().enumerate() {
        lines.push(format!("{} {} ({})", format_index(i + 1), term.name, term.slug));
        lines.push(format!("{}{}", indent(1), truncate_desc(&term.description, 72)));
    }
    lines
}

pub fn print_search(query: &str, terms: &[&GlossaryTerm]) {
    print_lines(format_search(query, terms));
}

// ============================================================================
// check
// ============================================================================

pub fn format_check(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![
        "Content".to_string(),
        format!(
            "{}{} industries, {} comparisons, {} terms",
            indent(1),
            report.industries,
            report.comparisons,
            report.terms
        ),
        format!("{}{} pages", indent(1), report.pages),
    ];
    if report.is_ok() {
        lines.push("No issues".to_string());
    } else {
        lines.push(format!("Issues ({})", report.issues.len()));
        for issue in &report.issues {
            lines.push(format!("{}{}", indent(1), issue));
        }
    }
    lines
}

pub fn print_check(report: &CheckReport) {
    print_lines(format_check(report));
}

// ============================================================================
// build
// ============================================================================

/// Summary of a build: written files, removed files, then totals.
pub fn format_build(report: &BuildReport, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for path in &report.written {
        lines.push(format!("{}{}", indent(1), path));
    }
    for path in &report.removed {
        lines.push(format!("{}{} (removed)", indent(1), path));
    }
    lines.push(format!(
        "Built {} pages \u{2192} {}",
        report.pages,
        output_dir.display()
    ));
    lines.push(format!("Files: {}", report.stats));
    lines
}

pub fn print_build(report: &BuildReport, output_dir: &Path) {
    print_lines(format_build(report, output_dir));
}

// ============================================================================
// Tests
// ============================================================================
