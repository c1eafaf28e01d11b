//! Route → page descriptor.
//!
//! A [`PageDescriptor`] is everything the host needs to render one page's
//! `<head>` and cross-links: metadata, JSON-LD blocks and related links.
//! Resolution is a lookup against the catalog; a route naming an entity
//! that doesn't exist is [`PageError::NotFound`], the only outcome a
//! visitor ever sees.

use crate::context::SeoContext;
use crate::i18n::I18nError;
use crate::locale::Locale;
use crate::metadata::{self, PageMetadata};
use crate::registry::{ComparisonData, Entity, GlossaryTerm, IndustryData, Registry};
use crate::relations::{DeclaredEdges, OthersCapped, RelatedResolver};
use crate::routes::{self, Route};
use crate::schema;
use crate::services::get_service;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("page not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Translation(#[from] I18nError),
}

/// A localized link to another generated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub route: Route,
    pub url: String,
    pub metadata: PageMetadata,
    pub structured_data: Vec<Value>,
    pub related: Vec<RelatedLink>,
}

fn not_found(route: &Route) -> PageError {
    PageError::NotFound(route.locale_path())
}

fn links<'r, T: Entity + 'r>(
    ctx: &SeoContext,
    items: impl IntoIterator<Item = &'r T>,
    locale: Locale,
    path: impl Fn(&T) -> String,
) -> Vec<RelatedLink> {
    items
        .into_iter()
        .map(|item| RelatedLink {
            name: item.name().to_string(),
            url: ctx.url(&path(item), locale),
        })
        .collect()
}

fn capped<'r, T: Entity>(
    resolver: &impl RelatedResolver<T>,
    registry: &'r Registry<T>,
    slug: &str,
    cap: usize,
) -> Vec<&'r T> {
    let mut items = resolver.related(registry, slug);
    items.truncate(cap);
    items
}

/// Build the descriptor for `route`.
pub fn resolve(ctx: &SeoContext, route: &Route) -> Result<PageDescriptor, PageError> {
    let catalog = ctx.catalog;
    let locale = route.locale();
    let caps = &ctx.config.related;

    let (metadata, structured_data, related) = match route {
        Route::Comparison { slug, .. } => {
            let comparison = catalog.comparisons.get(slug).ok_or_else(|| not_found(route))?;
            let others = capped(
                &OthersCapped {
                    cap: caps.comparisons,
                },
                &catalog.comparisons,
                slug,
                caps.comparisons,
            );
            (
                metadata::comparison_metadata(ctx, comparison, locale)?,
                schema::comparison_blocks(ctx, comparison, locale)?,
                links(ctx, others, locale, |c: &ComparisonData| routes::comparison_path(&c.slug)),
            )
        }
        Route::Glossary { slug, .. } => {
            let term = catalog.glossary.get(slug).ok_or_else(|| not_found(route))?;
            let terms = capped(&DeclaredEdges, &catalog.glossary, slug, caps.glossary);
            (
                metadata::glossary_metadata(ctx, term, locale)?,
                schema::glossary_blocks(ctx, term, locale)?,
                links(ctx, terms, locale, |t: &GlossaryTerm| routes::glossary_path(&t.slug)),
            )
        }
        Route::Persona {
            service, industry, ..
        } => {
            let service = get_service(service).ok_or_else(|| not_found(route))?;
            let industry = catalog
                .industries
                .get(industry)
                .ok_or_else(|| not_found(route))?;
            let others = capped(
                &OthersCapped {
                    cap: caps.industries,
                },
                &catalog.industries,
                &industry.slug,
                caps.industries,
            );
            (
                metadata::persona_metadata(ctx, service, industry, locale)?,
                schema::persona_blocks(ctx, service, industry, locale)?,
                links(ctx, others, locale, |i: &IndustryData| {
                    routes::persona_path(service.id, &i.slug)
                }),
            )
        }
    };

    Ok(PageDescriptor {
        route: route.clone(),
        url: metadata.canonical_url.clone(),
        metadata,
        structured_data,
        related,
    })
}

/// Parse a site path and resolve it.
pub fn resolve_path(ctx: &SeoContext, path: &str) -> Result<PageDescriptor, PageError> {
    let route = Route::parse(path).ok_or_else(|| PageError::NotFound(path.to_string()))?;
    resolve(ctx, &route)
}
