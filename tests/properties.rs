//! Whole-catalog properties and the end-to-end scenarios.
//!
//! These run against the builtin content and string tables, so they double
//! as a content regression suite: a record or string edit that breaks a
//! property fails here.

use airio_seo::context::SeoContext;
use airio_seo::locale::{Locale, build_url};
use airio_seo::metadata::{comparison_metadata, glossary_metadata, persona_metadata};
use airio_seo::page::{PageError, resolve_path};
use airio_seo::registry::{
    Catalog, comparison_slugs, get_comparison_by_slug, get_industry_by_slug, get_term_by_slug,
    industry_slugs, term_slugs,
};
use airio_seo::relations::get_related_terms;
use airio_seo::routes::{Route, all_routes, comparison_routes, glossary_routes, persona_routes};
use airio_seo::schema::faq::comparison_faqs;
use airio_seo::schema::{self, faq_page};
use airio_seo::services::SERVICES;
use pretty_assertions::assert_eq;

const ORIGIN: &str = "https://ai.rio.br";

fn ctx() -> SeoContext {
    SeoContext::default()
}

// =========================================================================
// Registries
// =========================================================================

#[test]
fn every_listed_slug_resolves() {
    for slug in industry_slugs() {
        assert_eq!(get_industry_by_slug(slug).map(|i| i.slug.as_str()), Some(slug));
    }
    for slug in comparison_slugs() {
        assert_eq!(get_comparison_by_slug(slug).map(|c| c.slug.as_str()), Some(slug));
    }
    for slug in term_slugs() {
        assert_eq!(get_term_by_slug(slug).map(|t| t.slug.as_str()), Some(slug));
    }
}

#[test]
fn related_terms_exist_and_keep_declared_order() {
    let catalog = Catalog::builtin();
    for term in &catalog.glossary {
        let resolved: Vec<&str> = get_related_terms(&term.slug)
            .iter()
            .map(|t| t.slug.as_str())
            .collect();
        let expected: Vec<&str> = term
            .related_terms
            .iter()
            .map(String::as_str)
            .filter(|s| catalog.glossary.contains(s))
            .collect();
        assert_eq!(resolved, expected, "{}", term.slug);
    }
}

// =========================================================================
// Metadata
// =========================================================================

fn assert_complete(meta: &airio_seo::metadata::PageMetadata) {
    assert!(!meta.title.is_empty());
    assert!(!meta.description.is_empty());
    assert!(!meta.keywords.is_empty());
    for key in ["en", "es", "pt", "x-default"] {
        assert!(meta.alternate_urls.contains_key(key), "{key} missing");
    }
    assert_eq!(meta.alternate_urls.len(), 4);
}

#[test]
fn metadata_is_complete_for_every_page() {
    let ctx = ctx();
    let catalog = Catalog::builtin();
    for locale in Locale::ALL {
        for comparison in &catalog.comparisons {
            assert_complete(&comparison_metadata(&ctx, comparison, locale).unwrap());
        }
        for term in &catalog.glossary {
            assert_complete(&glossary_metadata(&ctx, term, locale).unwrap());
        }
        for service in SERVICES {
            for industry in &catalog.industries {
                assert_complete(&persona_metadata(&ctx, service, industry, locale).unwrap());
            }
        }
    }
}

#[test]
fn english_urls_have_no_locale_segment() {
    for route in all_routes(Catalog::builtin()) {
        let path = route.path();
        let en = build_url(ORIGIN, &path, Locale::En);
        assert!(!en.contains("/en/"), "{en}");
        assert_eq!(en, format!("{ORIGIN}{path}"));
        for locale in [Locale::Es, Locale::Pt] {
            let url = build_url(ORIGIN, &path, locale);
            assert_eq!(url, format!("{ORIGIN}/{}{path}", locale.code()));
        }
    }
}

#[test]
fn generators_are_deterministic() {
    let ctx = ctx();
    for route in all_routes(Catalog::builtin()) {
        let path = route.locale_path();
        let a = resolve_path(&ctx, &path).unwrap();
        let b = resolve_path(&ctx, &path).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

// =========================================================================
// Enumeration
// =========================================================================

#[test]
fn enumeration_sizes() {
    let catalog = Catalog::builtin();
    assert_eq!(
        persona_routes(catalog).len(),
        SERVICES.len() * catalog.industries.len() * Locale::ALL.len()
    );
    assert_eq!(
        comparison_routes(catalog).len(),
        catalog.comparisons.len() * Locale::ALL.len()
    );
    assert_eq!(
        glossary_routes(catalog).len(),
        catalog.glossary.len() * Locale::ALL.len()
    );
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn scenario_build_in_house_comparison_title() {
    let comparison = get_comparison_by_slug("build-in-house").unwrap();
    assert_eq!(comparison.name, "Build In-House");
    let meta = comparison_metadata(&ctx(), comparison, Locale::En).unwrap();
    assert_eq!(meta.title, "Ai.Rio vs Build In-House: Comparison & Review");
}

#[test]
fn scenario_stripe_meter_related_terms() {
    assert!(get_term_by_slug("stripe-meter").is_some());
    let related = get_related_terms("stripe-meter");
    let slugs: Vec<&str> = related.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec!["usage-based-billing", "metered-billing", "usage-records", "event-aggregation"]
    );
    assert_eq!(related[0].name, "Usage-Based Billing");
}

#[test]
fn scenario_proration_urls() {
    assert_eq!(
        build_url(ORIGIN, "/glossary/proration", Locale::Es),
        "https://ai.rio.br/es/glossary/proration"
    );
    assert_eq!(
        build_url(ORIGIN, "/glossary/proration", Locale::En),
        "https://ai.rio.br/glossary/proration"
    );
}

#[test]
fn scenario_unknown_industry_is_not_found() {
    assert!(get_industry_by_slug("nonexistent").is_none());

    let path = "/services/usage-based-billing/for-nonexistent";
    assert!(matches!(resolve_path(&ctx(), path), Err(PageError::NotFound(_))));

    let route = Route::parse(path).unwrap();
    assert!(!persona_routes(Catalog::builtin()).contains(&route));
}

#[test]
fn scenario_stripe_billing_faq_in_portuguese() {
    let comparison = get_comparison_by_slug("stripe-billing").unwrap();
    let faqs = comparison_faqs(&ctx(), comparison, Locale::Pt).unwrap();
    let value = faq_page(&faqs);

    assert_eq!(value["@context"], schema::SCHEMA_CONTEXT);
    assert_eq!(value["@type"], "FAQPage");

    let entities = value["mainEntity"].as_array().unwrap();
    let choose_alt = &entities[1];
    assert_eq!(choose_alt["name"], "Quando devo escolher Stripe Billing?");
    let answer = choose_alt["acceptedAnswer"]["text"].as_str().unwrap();
    for reason in &comparison.when_to_choose_alternative[..3] {
        assert!(answer.contains(reason.as_str()));
    }
    assert!(!answer.contains(comparison.when_to_choose_alternative[3].as_str()));

    let choose_us = entities[2]["acceptedAnswer"]["text"].as_str().unwrap();
    for reason in &comparison.when_to_choose_ai_rio[..3] {
        assert!(choose_us.contains(reason.as_str()));
    }
    assert!(!choose_us.contains(comparison.when_to_choose_ai_rio[3].as_str()));
}
