//! Page identities and static path enumeration.
//!
//! A [`Route`] is one page the site serves: a comparison, a glossary term or
//! a persona page (service × industry), each in one locale. The enumerators
//! produce every valid route from the registries; [`Route::exists`] is the
//! membership test against the same registries, so anything outside the
//! enumeration resolves to not-found.
//!
//! ## Path contract
//!
//! ```text
//! /{locale?}/compare/{slug}
//! /{locale?}/glossary/{slug}
//! /{locale?}/services/{service}/for-{industry}
//! ```
//!
//! `{locale?}` is omitted for English and present for the others. `/en/...`
//! is not a canonical path and does not parse.

use crate::locale::Locale;
use crate::registry::{Catalog, Entity};
use crate::services::{SERVICES, get_service};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const COMPARE_SECTION: &str = "/compare";
pub const GLOSSARY_SECTION: &str = "/glossary";
pub const SERVICES_SECTION: &str = "/services";

const PERSONA_PREFIX: &str = "for-";

pub fn comparison_path(slug: &str) -> String {
    format!("{COMPARE_SECTION}/{slug}")
}

pub fn glossary_path(slug: &str) -> String {
    format!("{GLOSSARY_SECTION}/{slug}")
}

pub fn persona_path(service: &str, industry: &str) -> String {
    format!("{SERVICES_SECTION}/{service}/{PERSONA_PREFIX}{industry}")
}

/// Page type, without the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Comparison,
    Glossary,
    Persona,
}

impl RouteKind {
    pub const ALL: [RouteKind; 3] = [RouteKind::Comparison, RouteKind::Glossary, RouteKind::Persona];

    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Comparison => "comparison",
            RouteKind::Glossary => "glossary",
            RouteKind::Persona => "persona",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown page kind: {0} (expected comparison, glossary or persona)")]
pub struct UnknownRouteKind(pub String);

impl FromStr for RouteKind {
    type Err = UnknownRouteKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownRouteKind(s.to_string()))
    }
}

/// One page in one locale.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Route {
    Comparison {
        locale: Locale,
        slug: String,
    },
    Glossary {
        locale: Locale,
        slug: String,
    },
    Persona {
        locale: Locale,
        service: String,
        industry: String,
    },
}

impl Route {
    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Comparison { .. } => RouteKind::Comparison,
            Route::Glossary { .. } => RouteKind::Glossary,
            Route::Persona { .. } => RouteKind::Persona,
        }
    }

    pub fn locale(&self) -> Locale {
        match self {
            Route::Comparison { locale, .. }
            | Route::Glossary { locale, .. }
            | Route::Persona { locale, .. } => *locale,
        }
    }

    /// Same page in another locale.
    pub fn with_locale(&self, locale: Locale) -> Route {
        let mut route = self.clone();
        match &mut route {
            Route::Comparison { locale: l, .. }
            | Route::Glossary { locale: l, .. }
            | Route::Persona { locale: l, .. } => *l = locale,
        }
        route
    }

    /// Locale-free canonical path, e.g. `/compare/lago`.
    pub fn path(&self) -> String {
        match self {
            Route::Comparison { slug, .. } => comparison_path(slug),
            Route::Glossary { slug, .. } => glossary_path(slug),
            Route::Persona {
                service, industry, ..
            } => persona_path(service, industry),
        }
    }

    /// Site-relative path including the locale segment where one applies.
    pub fn locale_path(&self) -> String {
        let locale = self.locale();
        if locale.is_default() {
            self.path()
        } else {
            format!("/{}{}", locale.code(), self.path())
        }
    }

    /// Parse a site-relative URL path.
    ///
    /// Query strings and fragments are ignored, as are repeated or trailing
    /// slashes. Returns `None` for anything off the path contract, including
    /// an explicit `/en` prefix.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut locale = Locale::DEFAULT;
        if let Some(Ok(explicit)) = segments.first().map(|s| s.parse::<Locale>()) {
            if explicit.is_default() {
                return None;
            }
            locale = explicit;
            segments.remove(0);
        }

        match segments.as_slice() {
            ["compare", slug] => Some(Route::Comparison {
                locale,
                slug: slug.to_string(),
            }),
            ["glossary", slug] => Some(Route::Glossary {
                locale,
                slug: slug.to_string(),
            }),
            ["services", service, persona] => {
                let industry = persona.strip_prefix(PERSONA_PREFIX)?;
                if industry.is_empty() {
                    return None;
                }
                Some(Route::Persona {
                    locale,
                    service: service.to_string(),
                    industry: industry.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Whether the route names entities that exist.
    pub fn exists(&self, catalog: &Catalog) -> bool {
        match self {
            Route::Comparison { slug, .. } => catalog.comparisons.contains(slug),
            Route::Glossary { slug, .. } => catalog.glossary.contains(slug),
            Route::Persona {
                service, industry, ..
            } => get_service(service).is_some() && catalog.industries.contains(industry),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locale_path())
    }
}

/// Every comparison page: locale × comparison slug.
pub fn comparison_routes(catalog: &Catalog) -> Vec<Route> {
    Locale::ALL
        .into_iter()
        .flat_map(|locale| {
            catalog.comparisons.iter().map(move |c| Route::Comparison {
                locale,
                slug: c.slug().to_string(),
            })
        })
        .collect()
}

/// Every glossary page: locale × term slug.
pub fn glossary_routes(catalog: &Catalog) -> Vec<Route> {
    Locale::ALL
        .into_iter()
        .flat_map(|locale| {
            catalog.glossary.iter().map(move |t| Route::Glossary {
                locale,
                slug: t.slug().to_string(),
            })
        })
        .collect()
}

/// Every persona page: locale × service × industry.
pub fn persona_routes(catalog: &Catalog) -> Vec<Route> {
    let mut routes = Vec::with_capacity(Locale::ALL.len() * SERVICES.len() * catalog.industries.len());
    for locale in Locale::ALL {
        for service in SERVICES {
            for industry in &catalog.industries {
                routes.push(Route::Persona {
                    locale,
                    service: service.id.to_string(),
                    industry: industry.slug().to_string(),
                });
            }
        }
    }
    routes
}

pub fn routes_of_kind(catalog: &Catalog, kind: RouteKind) -> Vec<Route> {
    match kind {
        RouteKind::Comparison => comparison_routes(catalog),
        RouteKind::Glossary => glossary_routes(catalog),
        RouteKind::Persona => persona_routes(catalog),
    }
}

/// Every page the site serves, grouped by kind.
pub fn all_routes(catalog: &Catalog) -> Vec<Route> {
    RouteKind::ALL
        .into_iter()
        .flat_map(|kind| routes_of_kind(catalog, kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> &'static Catalog {
        Catalog::builtin()
    }

    #[test]
    fn enumeration_sizes_are_cross_products() {
        let c = catalog();
        assert_eq!(comparison_routes(c).len(), c.comparisons.len() * 3);
        assert_eq!(glossary_routes(c).len(), c.glossary.len() * 3);
        assert_eq!(persona_routes(c).len(), SERVICES.len() * c.industries.len() * 3);
        assert_eq!(
            all_routes(c).len(),
            (c.comparisons.len() + c.glossary.len() + SERVICES.len() * c.industries.len()) * 3
        );
    }

    #[test]
    fn enumeration_has_no_duplicates() {
        let routes = all_routes(catalog());
        let unique: std::collections::HashSet<_> = routes.iter().collect();
        assert_eq!(unique.len(), routes.len());
    }

    #[test]
    fn every_enumerated_route_exists() {
        for route in all_routes(catalog()) {
            assert!(route.exists(catalog()), "{route}");
        }
    }

    #[test]
    fn persona_order_is_locale_then_service_then_industry() {
        let routes = persona_routes(catalog());
        assert_eq!(
            routes[0],
            Route::Persona {
                locale: Locale::En,
                service: "usage-based-billing".into(),
                industry: "saas".into(),
            }
        );
        assert_eq!(routes[1].locale(), Locale::En);
        assert_eq!(routes.last().map(Route::locale), Some(Locale::Pt));
    }

    #[test]
    fn paths_follow_contract() {
        let route = Route::Persona {
            locale: Locale::Es,
            service: "stripe-integration".into(),
            industry: "fintech".into(),
        };
        assert_eq!(route.path(), "/services/stripe-integration/for-fintech");
        assert_eq!(route.locale_path(), "/es/services/stripe-integration/for-fintech");

        let route = Route::Glossary {
            locale: Locale::En,
            slug: "proration".into(),
        };
        assert_eq!(route.locale_path(), "/glossary/proration");
    }

    #[test]
    fn parse_inverts_locale_path() {
        for route in all_routes(catalog()) {
            assert_eq!(Route::parse(&route.locale_path()), Some(route));
        }
    }

    #[test]
    fn parse_tolerates_slashes_and_query() {
        assert_eq!(
            Route::parse("/pt/compare/lago/?ref=nav#faq"),
            Some(Route::Comparison {
                locale: Locale::Pt,
                slug: "lago".into(),
            })
        );
    }

    #[test]
    fn explicit_default_locale_does_not_parse() {
        assert_eq!(Route::parse("/en/compare/lago"), None);
    }

    #[test]
    fn off_contract_paths_do_not_parse() {
        assert_eq!(Route::parse("/"), None);
        assert_eq!(Route::parse("/fr/compare/lago"), None);
        assert_eq!(Route::parse("/compare"), None);
        assert_eq!(Route::parse("/compare/lago/extra"), None);
        assert_eq!(Route::parse("/services/stripe-integration/fintech"), None);
        assert_eq!(Route::parse("/services/stripe-integration/for-"), None);
    }

    #[test]
    fn unknown_entities_do_not_exist() {
        let route = Route::Persona {
            locale: Locale::En,
            service: "usage-based-billing".into(),
            industry: "nonexistent".into(),
        };
        assert!(!route.exists(catalog()));
        assert!(!persona_routes(catalog()).contains(&route));

        let route = Route::Persona {
            locale: Locale::En,
            service: "seo-audit".into(),
            industry: "saas".into(),
        };
        assert!(!route.exists(catalog()));
    }

    #[test]
    fn with_locale_keeps_entity() {
        let route = Route::Comparison {
            locale: Locale::En,
            slug: "orb".into(),
        };
        let es = route.with_locale(Locale::Es);
        assert_eq!(es.locale(), Locale::Es);
        assert_eq!(es.path(), route.path());
    }

    #[test]
    fn route_kind_parses() {
        assert_eq!("persona".parse::<RouteKind>(), Ok(RouteKind::Persona));
        assert!("blog".parse::<RouteKind>().is_err());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let route = Route::Glossary {
            locale: Locale::Pt,
            slug: "mrr".into(),
        };
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "glossary", "locale": "pt", "slug": "mrr"})
        );
    }
}
