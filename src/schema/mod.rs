//! schema.org JSON-LD generators.
//!
//! Every generator returns a `serde_json::Value` tagged with `@context` and
//! `@type`, ready to embed verbatim in a `<script type="application/ld+json">`
//! block. Nothing here validates against the schema.org vocabulary.
//!
//! | Page       | Blocks                                   |
//! |------------|------------------------------------------|
//! | comparison | Article, BreadcrumbList, FAQPage         |
//! | glossary   | DefinedTerm, BreadcrumbList, FAQPage     |
//! | persona    | Service (with Offer), BreadcrumbList, FAQPage |
//!
//! Output is a pure function of its inputs. Article dates come from
//! `[schema]` in the config, never from a clock.

pub mod faq;

use crate::context::SeoContext;
use crate::i18n::I18nError;
use crate::locale::Locale;
use crate::registry::{ComparisonData, GlossaryTerm, IndustryData};
use crate::routes::{self, COMPARE_SECTION, GLOSSARY_SECTION, SERVICES_SECTION};
use crate::services::ServiceConfig;
use faq::Faq;
use serde_json::{Value, json};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// The fixed publisher/provider identity.
pub fn organization(ctx: &SeoContext) -> Value {
    let site = &ctx.config.site;
    json!({
        "@type": "Organization",
        "name": site.name,
        "url": ctx.url("", Locale::DEFAULT),
        "logo": site.asset_url(&site.logo),
    })
}

/// `Service` with a nested `Offer` for a persona page.
pub fn service_schema(
    ctx: &SeoContext,
    service: &ServiceConfig,
    industry: &IndustryData,
    locale: Locale,
) -> Result<Value, I18nError> {
    let vars = [
        ("service", service.name(locale)),
        ("industry", industry.name.as_str()),
        ("price", service.price),
        ("window", service.delivery_window(locale)),
    ];
    let name = ctx.text("persona", locale, "offer_name", &vars)?;
    let description = ctx.text("persona", locale, "offer_description", &vars)?;
    let url = ctx.url(&routes::persona_path(service.id, &industry.slug), locale);

    Ok(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Service",
        "name": name,
        "description": description,
        "serviceType": service.name(locale),
        "url": url,
        "inLanguage": locale.code(),
        "provider": organization(ctx),
        "audience": {
            "@type": "BusinessAudience",
            "audienceType": industry.name,
        },
        "offers": {
            "@type": "Offer",
            "name": name,
            "price": service.price_amount,
            "priceCurrency": service.currency,
            "url": url,
            "availability": "https://schema.org/InStock",
        },
    }))
}

/// `Article` for a comparison page.
pub fn article_schema(
    ctx: &SeoContext,
    comparison: &ComparisonData,
    locale: Locale,
) -> Result<Value, I18nError> {
    let vars = [("name", comparison.name.as_str())];
    let headline = ctx.text("comparison", locale, "headline", &vars)?;
    let description = ctx.text("comparison", locale, "article_description", &vars)?;
    let url = ctx.url(&routes::comparison_path(&comparison.slug), locale);
    let site = &ctx.config.site;

    Ok(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Article",
        "headline": headline,
        "description": description,
        "url": url,
        "inLanguage": locale.code(),
        "image": site.asset_url(&site.og_image),
        "author": organization(ctx),
        "publisher": organization(ctx),
        "datePublished": ctx.config.schema.date_published,
        "dateModified": ctx.config.schema.date_modified,
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": url,
        },
    }))
}

/// `DefinedTerm` for a glossary page, inside the site's `DefinedTermSet`.
pub fn defined_term_schema(
    ctx: &SeoContext,
    term: &GlossaryTerm,
    locale: Locale,
) -> Result<Value, I18nError> {
    let set_name = ctx.text("common", locale, "term_set_name", &[])?;
    let mut value = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "DefinedTerm",
        "name": term.name,
        "description": term.definition,
        "termCode": term.slug,
        "url": ctx.url(&routes::glossary_path(&term.slug), locale),
        "inLanguage": locale.code(),
        "inDefinedTermSet": {
            "@type": "DefinedTermSet",
            "@id": ctx.url(GLOSSARY_SECTION, locale),
            "name": set_name,
        },
    });
    if let Some(kind) = &term.schema_type {
        value["additionalType"] = json!(kind);
    }
    Ok(value)
}

/// One breadcrumb: a label and a locale-free site path (`""` for home).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

impl Crumb {
    fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

fn label(ctx: &SeoContext, locale: Locale, key: &str) -> Result<String, I18nError> {
    ctx.text("common", locale, key, &[])
}

pub fn comparison_crumbs(
    ctx: &SeoContext,
    comparison: &ComparisonData,
    locale: Locale,
) -> Result<Vec<Crumb>, I18nError> {
    Ok(vec![
        Crumb::new(label(ctx, locale, "home")?, ""),
        Crumb::new(label(ctx, locale, "compare")?, COMPARE_SECTION),
        Crumb::new(
            comparison.name.as_str(),
            routes::comparison_path(&comparison.slug),
        ),
    ])
}

pub fn glossary_crumbs(
    ctx: &SeoContext,
    term: &GlossaryTerm,
    locale: Locale,
) -> Result<Vec<Crumb>, I18nError> {
    Ok(vec![
        Crumb::new(label(ctx, locale, "home")?, ""),
        Crumb::new(label(ctx, locale, "glossary")?, GLOSSARY_SECTION),
        Crumb::new(term.name.as_str(), routes::glossary_path(&term.slug)),
    ])
}

pub fn persona_crumbs(
    ctx: &SeoContext,
    service: &ServiceConfig,
    industry: &IndustryData,
    locale: Locale,
) -> Result<Vec<Crumb>, I18nError> {
    Ok(vec![
        Crumb::new(label(ctx, locale, "home")?, ""),
        Crumb::new(label(ctx, locale, "services")?, SERVICES_SECTION),
        Crumb::new(service.name(locale), service.path()),
        Crumb::new(
            industry.name.as_str(),
            routes::persona_path(service.id, &industry.slug),
        ),
    ])
}

/// `BreadcrumbList` with 1-based positions and absolute URLs.
pub fn breadcrumb_list(ctx: &SeoContext, crumbs: &[Crumb], locale: Locale) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.name,
                "item": ctx.url(&crumb.path, locale),
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// `FAQPage` from question/answer pairs, in order.
pub fn faq_page(faqs: &[Faq]) -> Value {
    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// Every JSON-LD block for a comparison page.
pub fn comparison_blocks(
    ctx: &SeoContext,
    comparison: &ComparisonData,
    locale: Locale,
) -> Result<Vec<Value>, I18nError> {
    Ok(vec![
        article_schema(ctx, comparison, locale)?,
        breadcrumb_list(ctx, &comparison_crumbs(ctx, comparison, locale)?, locale),
        faq_page(&faq::comparison_faqs(ctx, comparison, locale)?),
    ])
}

/// Every JSON-LD block for a glossary page.
pub fn glossary_blocks(
    ctx: &SeoContext,
    term: &GlossaryTerm,
    locale: Locale,
) -> Result<Vec<Value>, I18nError> {
    Ok(vec![
        defined_term_schema(ctx, term, locale)?,
        breadcrumb_list(ctx, &glossary_crumbs(ctx, term, locale)?, locale),
        faq_page(&faq::glossary_faqs(ctx, term, locale)?),
    ])
}

/// Every JSON-LD block for a persona page.
pub fn persona_blocks(
    ctx: &SeoContext,
    service: &ServiceConfig,
    industry: &IndustryData,
    locale: Locale,
) -> Result<Vec<Value>, I18nError> {
    Ok(vec![
        service_schema(ctx, service, industry, locale)?,
        breadcrumb_list(ctx, &persona_crumbs(ctx, service, industry, locale)?, locale),
        faq_page(&faq::persona_faqs(ctx, service, industry, locale)?),
    ])
}
