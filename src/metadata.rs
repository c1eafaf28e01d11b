//! Page metadata synthesis.
//!
//! Produces the descriptor a host framework maps onto its `<head>`: title,
//! description, keywords, canonical URL, hreflang alternates, OpenGraph and
//! Twitter card. One function per page type; all share [`synthesize`].
//!
//! ## Locale handling
//!
//! Titles and descriptions come from the page type's namespace in the string
//! tables. URLs follow as-needed prefixing (see [`crate::locale::build_url`]).
//! `alternate_urls` always carries every locale plus `x-default`, which
//! points at the English URL.
//!
//! The OpenGraph block has its own title and description templates; the
//! Twitter card reuses the base title and description.
//!
//! ## Keywords
//!
//! Entity-derived keywords first, then the site's platform keywords, with
//! case-insensitive duplicates removed. Keywords are identical in every locale.

use crate::context::SeoContext;
use crate::i18n::I18nError;
use crate::locale::Locale;
use crate::registry::{ComparisonData, GlossaryTerm, IndustryData};
use crate::routes;
use crate::services::ServiceConfig;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

pub const TWITTER_CARD: &str = "summary_large_image";
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    /// hreflang code → URL, including `x-default`.
    pub alternate_urls: BTreeMap<String, String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    pub alternate_locale: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub images: Vec<String>,
}

/// Page-type specific inputs to [`synthesize`].
struct Draft<'a> {
    path: String,
    locale: Locale,
    namespace: &'static str,
    vars: Vec<(&'a str, &'a str)>,
    keywords: Vec<String>,
    og_kind: &'static str,
}

fn synthesize(ctx: &SeoContext, draft: Draft<'_>) -> Result<PageMetadata, I18nError> {
    let Draft {
        path,
        locale,
        namespace,
        vars,
        keywords,
        og_kind,
    } = draft;
    let site = &ctx.config.site;

    let title = ctx.text(namespace, locale, "title", &vars)?;
    let description = ctx.text(namespace, locale, "description", &vars)?;
    let og_title = ctx.text(namespace, locale, "og_title", &vars)?;
    let og_description = ctx.text(namespace, locale, "og_description", &vars)?;

    let canonical_url = ctx.url(&path, locale);
    let image_url = site.asset_url(&site.og_image);

    Ok(PageMetadata {
        keywords: merge_keywords(keywords, &site.keywords),
        alternate_urls: alternate_urls(ctx, &path),
        open_graph: OpenGraph {
            images: vec![OgImage {
                url: image_url.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: og_title.clone(),
            }],
            title: og_title,
            description: og_description,
            url: canonical_url.clone(),
            site_name: site.name.clone(),
            locale: locale.og_code().to_string(),
            alternate_locale: locale.others().map(|l| l.og_code().to_string()).collect(),
            kind: og_kind.to_string(),
        },
        twitter: TwitterCard {
            card: TWITTER_CARD.to_string(),
            title: title.clone(),
            description: description.clone(),
            site: site.twitter_site.clone(),
            images: vec![image_url],
        },
        title,
        description,
        canonical_url,
    })
}

/// Every locale's URL for `path`, plus `x-default` → the default locale's.
pub fn alternate_urls(ctx: &SeoContext, path: &str) -> BTreeMap<String, String> {
    let mut urls: BTreeMap<String, String> = Locale::ALL
        .into_iter()
        .map(|l| (l.code().to_string(), ctx.url(path, l)))
        .collect();
    urls.insert("x-default".to_string(), ctx.url(path, Locale::DEFAULT));
    urls
}

/// Entity keywords followed by platform keywords, first occurrence wins.
pub fn merge_keywords(base: Vec<String>, platform: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    base.into_iter()
        .chain(platform.iter().cloned())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
        .collect()
}

pub fn comparison_metadata(
    ctx: &SeoContext,
    comparison: &ComparisonData,
    locale: Locale,
) -> Result<PageMetadata, I18nError> {
    let brand = &ctx.config.site.name;
    let name = comparison.name.as_str();
    synthesize(
        ctx,
        Draft {
            path: routes::comparison_path(&comparison.slug),
            locale,
            namespace: "comparison",
            vars: vec![("name", name), ("description", comparison.description.as_str())],
            keywords: vec![
                name.to_string(),
                format!("{name} alternative"),
                format!("{brand} vs {name}"),
                format!("{name} vs {brand}"),
                format!("{name} comparison"),
            ],
            og_kind: "article",
        },
    )
}

pub fn glossary_metadata(
    ctx: &SeoContext,
    term: &GlossaryTerm,
    locale: Locale,
) -> Result<PageMetadata, I18nError> {
    let name = term.name.as_str();
    synthesize(
        ctx,
        Draft {
            path: routes::glossary_path(&term.slug),
            locale,
            namespace: "glossary",
            vars: vec![("name", name), ("description", term.description.as_str())],
            keywords: vec![
                name.to_string(),
                format!("what is {name}"),
                format!("{name} definition"),
                term.slug.replace('-', " "),
            ],
            og_kind: "article",
        },
    )
}

pub fn persona_metadata(
    ctx: &SeoContext,
    service: &ServiceConfig,
    industry: &IndustryData,
    locale: Locale,
) -> Result<PageMetadata, I18nError> {
    let mut keywords = industry.seo_keywords.clone();
    keywords.push(industry.name.clone());
    keywords.push(format!(
        "{} for {}",
        service.name(Locale::DEFAULT),
        industry.name
    ));

    synthesize(
        ctx,
        Draft {
            path: routes::persona_path(service.id, &industry.slug),
            locale,
            namespace: "persona",
            vars: vec![
                ("service", service.name(locale)),
                ("industry", industry.name.as_str()),
                ("price", service.price),
                ("window", service.delivery_window(locale)),
            ],
            keywords,
            og_kind: "website",
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{FallbackPolicy, Translations};
    use crate::registry::{get_comparison_by_slug, get_industry_by_slug, get_term_by_slug};
    use crate::services::get_service;
    use crate::test_helpers::ctx;
    use pretty_assertions::assert_eq;

    #[test]
    fn comparison_title_in_english() {
        let comparison = get_comparison_by_slug("build-in-house").unwrap();
        let meta = comparison_metadata(&ctx(), comparison, Locale::En).unwrap();
        assert_eq!(meta.title, "Ai.Rio vs Build In-House: Comparison & Review");
        assert_eq!(meta.canonical_url, "https://ai.rio.br/compare/build-in-house");
    }

    #[test]
    fn comparison_title_in_portuguese() {
        let comparison = get_comparison_by_slug("lago").unwrap();
        let meta = comparison_metadata(&ctx(), comparison, Locale::Pt).unwrap();
        assert_eq!(meta.title, "Ai.Rio vs Lago: Comparação e Análise");
        assert_eq!(meta.canonical_url, "https://ai.rio.br/pt/compare/lago");
    }

    #[test]
    fn alternates_cover_every_locale_and_x_default() {
        let term = get_term_by_slug("proration").unwrap();
        let meta = glossary_metadata(&ctx(), term, Locale::Es).unwrap();
        let expected: BTreeMap<String, String> = [
            ("en", "https://ai.rio.br/glossary/proration"),
            ("es", "https://ai.rio.br/es/glossary/proration"),
            ("pt", "https://ai.rio.br/pt/glossary/proration"),
            ("x-default", "https://ai.rio.br/glossary/proration"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(meta.alternate_urls, expected);
    }

    #[test]
    fn open_graph_uses_region_codes() {
        let term = get_term_by_slug("mrr").unwrap();
        let meta = glossary_metadata(&ctx(), term, Locale::Pt).unwrap();
        assert_eq!(meta.open_graph.locale, "pt_BR");
        assert_eq!(meta.open_graph.alternate_locale, vec!["en_US", "es_ES"]);
        assert_eq!(meta.open_graph.kind, "article");
        assert_eq!(meta.open_graph.site_name, "Ai.Rio");
    }

    #[test]
    fn twitter_reuses_base_title_not_og_title() {
        let comparison = get_comparison_by_slug("orb").unwrap();
        let meta = comparison_metadata(&ctx(), comparison, Locale::En).unwrap();
        assert_eq!(meta.twitter.title, meta.title);
        assert_eq!(meta.twitter.description, meta.description);
        assert_ne!(meta.open_graph.title, meta.title);
        assert_eq!(meta.twitter.card, "summary_large_image");
        assert_eq!(meta.twitter.site.as_deref(), Some("@airio"));
    }

    #[test]
    fn persona_metadata_interpolates_service_and_industry() {
        let service = get_service("usage-based-billing").unwrap();
        let industry = get_industry_by_slug("fintech").unwrap();
        let meta = persona_metadata(&ctx(), service, industry, Locale::Es).unwrap();
        assert_eq!(
            meta.title,
            "Implementación de Facturación por Uso para Fintech | Ai.Rio"
        );
        assert_eq!(
            meta.canonical_url,
            "https://ai.rio.br/es/services/usage-based-billing/for-fintech"
        );
        assert_eq!(meta.open_graph.kind, "website");
        assert!(meta.description.contains("$4,997"));
        assert!(meta.description.contains("2-4 semanas"));
    }

    #[test]
    fn persona_keywords_start_with_industry_keywords() {
        let service = get_service("stripe-integration").unwrap();
        let industry = get_industry_by_slug("saas").unwrap();
        let meta = persona_metadata(&ctx(), service, industry, Locale::En).unwrap();
        assert_eq!(meta.keywords[0], industry.seo_keywords[0]);
        assert!(meta.keywords.contains(&"Stripe Billing Integration for SaaS".to_string()));
        assert!(meta.keywords.contains(&"Ai.Rio".to_string()));
    }

    #[test]
    fn keywords_are_locale_invariant() {
        let comparison = get_comparison_by_slug("chargebee").unwrap();
        let en = comparison_metadata(&ctx(), comparison, Locale::En).unwrap();
        let pt = comparison_metadata(&ctx(), comparison, Locale::Pt).unwrap();
        assert_eq!(en.keywords, pt.keywords);
    }

    #[test]
    fn merge_keywords_dedupes_case_insensitively() {
        let merged = merge_keywords(
            vec!["Stripe Billing".into(), "  ".into(), "lago".into()],
            &["stripe billing".to_string(), "Ai.Rio".to_string()],
        );
        assert_eq!(merged, vec!["Stripe Billing", "lago", "Ai.Rio"]);
    }

    #[test]
    fn same_inputs_same_output() {
        let term = get_term_by_slug("webhook").unwrap();
        let a = glossary_metadata(&ctx(), term, Locale::Es).unwrap();
        let b = glossary_metadata(&ctx(), term, Locale::Es).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn missing_namespace_key_falls_back_in_warn_mode() {
        let strings = Translations::from_toml(
            r#"
[common.en]
title = "{name} | Ai.Rio"
description = "About {name}."
og_title = "{name}"
og_description = "Ai.Rio"
"#,
            "common",
            FallbackPolicy::Warn,
        )
        .unwrap();
        let ctx = ctx().with_strings(strings);
        let term = get_term_by_slug("churn").unwrap();
        let meta = glossary_metadata(&ctx, term, Locale::En).unwrap();
        assert_eq!(meta.title, "Churn | Ai.Rio");
        assert_eq!(meta.description, "About Churn.");
    }

    #[test]
    fn missing_namespace_key_fails_in_strict_mode() {
        let strings = Translations::from_toml(
            "[common.en]\ntitle = \"{name}\"\n",
            "common",
            FallbackPolicy::Strict,
        )
        .unwrap();
        let ctx = ctx().with_strings(strings);
        let term = get_term_by_slug("churn").unwrap();
        let err = glossary_metadata(&ctx, term, Locale::En).unwrap_err();
        assert!(matches!(err, I18nError::MissingKey { .. }));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let term = get_term_by_slug("arr").unwrap();
        let meta = glossary_metadata(&ctx(), term, Locale::En).unwrap();
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("canonicalUrl").is_some());
        assert!(json.get("alternateUrls").is_some());
        assert_eq!(json["openGraph"]["type"], "article");
        assert_eq!(json["openGraph"]["siteName"], "Ai.Rio");
    }
}
