//! # Ai.Rio SEO
//!
//! Programmatic page generation for the Ai.Rio marketing site. Three small,
//! hand-curated tables (industries, competitor comparisons, glossary terms)
//! are multiplied out into every page the site serves, each in English,
//! Spanish and Portuguese, with complete `<head>` metadata and schema.org
//! structured data.
//!
//! # Architecture: One-Way Data Flow
//!
//! ```text
//! content/*.toml ─→ registry ─→ relations ─┐
//! i18n/*.toml ────→ i18n ──────────────────┼─→ metadata ─┐
//! services (const) ────────────────────────┘   schema ───┼─→ page ─→ render / emit
//!                                    routes (enumeration) ┘
//! ```
//!
//! Everything is computed from data compiled into the binary plus the site
//! config. There is no clock, no randomness, no network: the same inputs
//! produce byte-identical output, which is what lets [`emit`] skip unchanged
//! files and keeps crawlers from seeing churn.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locale`] | The three locales, OpenGraph codes, as-needed URL prefixing |
//! | [`registry`] | Slug-keyed registries loaded from embedded TOML, with malformed-record dropping |
//! | [`relations`] | Related-entity resolvers: declared edges (glossary), others-capped (industries, comparisons) |
//! | [`i18n`] | Per-locale string tables, interpolation, default-namespace fallback |
//! | [`services`] | The fixed set of persona-page services, prices and delivery windows |
//! | [`context`] | Config, string tables and catalog bundled for the generators |
//! | [`metadata`] | Title, description, keywords, canonical, hreflang, OpenGraph, Twitter card |
//! | [`schema`] | JSON-LD: Service/Offer, Article, DefinedTerm, BreadcrumbList, FAQPage |
//! | [`routes`] | Page identities, path parsing, static path enumeration |
//! | [`page`] | Route → page descriptor, or not-found |
//! | [`render`] | Maud `<head>` fragments and `sitemap.xml` |
//! | [`emit`] | Static build into an output directory |
//! | [`cache`] | Content-hash manifest for incremental writes and stale pruning |
//! | [`check`] | Build-time validation of content and string tables |
//! | [`config`] | `config.toml` loading over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## As-Needed Locale Prefixing
//!
//! English URLs carry no locale segment; Spanish and Portuguese get `/es` and
//! `/pt` right after the origin. The asymmetry shows up
//! everywhere a URL is built, so all of them go through
//! [`locale::build_url`]. An explicit `/en/...` path is not canonical and
//! resolves to not-found rather than to a duplicate of the English page.
//!
//! ## Strings Live Apart From Records
//!
//! Registry records are locale-neutral. Everything a visitor reads in their
//! own language (titles, FAQ questions, breadcrumb labels) comes from the
//! string tables in `i18n/strings.toml`, interpolated with record fields.
//! Adding a locale means extending those tables, not every record. The one
//! exception is [`services`], whose handful of names and delivery windows
//! carry their own locale map.
//!
//! ## Lenient at Runtime, Strict in CI
//!
//! Page generation never fails on data quality. Malformed records are
//! dropped, dangling related terms disappear, missing strings fall back to
//! the `common` namespace. [`check`] is the one place that treats all of
//! that as an error, and `--strict` turns the fallback into a hard failure.
//!
//! ## FAQ From Existing Fields
//!
//! FAQ structured data is projected from fields the records already have
//! ("when to choose", pain points, definitions) rather than authored
//! separately, so there is one copy of the marketing text to maintain.
//! See [`schema::faq`].

pub mod cache;
pub mod check;
pub mod config;
pub mod context;
pub mod emit;
pub mod i18n;
pub mod locale;
pub mod metadata;
pub mod output;
pub mod page;
pub mod registry;
pub mod relations;
pub mod render;
pub mod routes;
pub mod schema;
pub mod services;

#[cfg(test)]
pub(crate) mod test_helpers;
