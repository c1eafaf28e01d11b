//! Per-locale literal string tables.
//!
//! Every generated string (titles, descriptions, FAQ text, breadcrumb labels)
//! comes from a table keyed by namespace, then locale, then key:
//!
//! ```toml
//! [comparison.en]
//! title = "Ai.Rio vs {name}: Comparison & Review"
//!
//! [comparison.pt]
//! title = "Ai.Rio vs {name}: Comparação e Análise"
//! ```
//!
//! The tables live in `i18n/strings.toml` and are embedded at compile time;
//! there is no runtime translation service. Templates use `{placeholder}`
//! interpolation (see [`interpolate`]).
//!
//! ## Placeholders
//!
//! | Namespace | Placeholders |
//! |-----------|--------------|
//! | `common` | `{name}` |
//! | `comparison` | `{name}`, `{items}`, `{alternative}`, `{ai_rio}` |
//! | `glossary` | `{name}`, `{description}`, `{items}` |
//! | `persona` | `{service}`, `{industry}`, `{price}`, `{window}`, `{items}`, `{weeks}` |
//!
//! `{items}` is a list field summarized to its first few entries. In
//! comparison FAQs `{alternative}` and `{ai_rio}` are the two sides of the
//! cost or timeline pair.
//!
//! ## Missing keys
//!
//! Under [`FallbackPolicy::Warn`] a miss in `(namespace, locale)` falls back
//! to the default namespace in the same locale, then to the default
//! namespace in the default locale, logging a warning. Page generation never
//! fails. Under [`FallbackPolicy::Strict`] the first miss is an error, which
//! is how CI validates that the tables are complete.
//!
//! Malformed table shapes (unknown locale codes, non-string values) are
//! dropped at load time with a warning.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

const STRINGS_TOML: &str = include_str!("../i18n/strings.toml");

#[derive(Error, Debug, Clone, PartialEq)]
pub enum I18nError {
    #[error("TOML parse error: {0}")]
    Toml(String),
    #[error("missing translation {namespace}.{locale}.{key}")]
    MissingKey {
        namespace: String,
        locale: Locale,
        key: String,
    },
}

impl From<toml::de::Error> for I18nError {
    fn from(e: toml::de::Error) -> Self {
        I18nError::Toml(e.to_string())
    }
}

/// What to do when a key is missing from its namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Fall back to the default namespace and log a warning.
    #[default]
    Warn,
    /// Fail on the first missing key.
    Strict,
}

/// Keys each namespace must define in every locale.
pub const REQUIRED_KEYS: &[(&str, &[&str])] = &[
    (
        "common",
        &[
            "home",
            "compare",
            "glossary",
            "services",
            "title",
            "description",
            "og_title",
            "og_description",
            "term_set_name",
        ],
    ),
    (
        "comparison",
        &[
            "title",
            "description",
            "og_title",
            "og_description",
            "headline",
            "article_description",
            "faq_difference_q",
            "faq_choose_alt_q",
            "faq_choose_alt_a",
            "faq_choose_us_q",
            "faq_choose_us_a",
            "faq_cost_q",
            "faq_cost_a",
            "faq_timeline_q",
            "faq_timeline_a",
        ],
    ),
    (
        "glossary",
        &[
            "title",
            "description",
            "og_title",
            "og_description",
            "faq_what_q",
            "faq_why_q",
            "faq_mistakes_q",
            "faq_mistakes_a",
        ],
    ),
    (
        "persona",
        &[
            "title",
            "description",
            "og_title",
            "og_description",
            "offer_name",
            "offer_description",
            "faq_challenges_q",
            "faq_challenges_a",
            "faq_price_q",
            "faq_price_a",
            "faq_timeline_q",
            "faq_timeline_a",
            "faq_integrations_q",
            "faq_integrations_a",
        ],
    ),
];

type Table = BTreeMap<String, String>;

/// Namespaced string tables with a fallback policy.
#[derive(Debug, Clone)]
pub struct Translations {
    tables: BTreeMap<String, BTreeMap<Locale, Table>>,
    default_namespace: String,
    policy: FallbackPolicy,
    dropped: Vec<String>,
}

impl Translations {
    /// Parse string tables from a TOML document.
    pub fn from_toml(
        source: &str,
        default_namespace: &str,
        policy: FallbackPolicy,
    ) -> Result<Self, I18nError> {
        let doc: toml::Table = toml::from_str(source)?;
        let mut tables = BTreeMap::new();
        let mut dropped = Vec::new();

        for (namespace, by_locale) in doc {
            let toml::Value::Table(by_locale) = by_locale else {
                drop_entry(&mut dropped, format!("{namespace}: not a table"));
                continue;
            };
            let mut locales = BTreeMap::new();
            for (code, entries) in by_locale {
                let Ok(locale) = code.parse::<Locale>() else {
                    drop_entry(&mut dropped, format!("{namespace}.{code}: unknown locale"));
                    continue;
                };
                let toml::Value::Table(entries) = entries else {
                    drop_entry(&mut dropped, format!("{namespace}.{code}: not a table"));
                    continue;
                };
                let mut table = Table::new();
                for (key, value) in entries {
                    match value {
                        toml::Value::String(s) => {
                            table.insert(key, s);
                        }
                        other => drop_entry(
                            &mut dropped,
                            format!("{namespace}.{code}.{key}: expected string, got {}", other.type_str()),
                        ),
                    }
                }
                locales.insert(locale, table);
            }
            tables.insert(namespace, locales);
        }

        Ok(Self {
            tables,
            default_namespace: default_namespace.to_string(),
            policy,
            dropped,
        })
    }

    /// The tables compiled into the binary.
    pub fn builtin(default_namespace: &str, policy: FallbackPolicy) -> Self {
        Self::from_toml(STRINGS_TOML, default_namespace, policy).unwrap_or_else(|e| {
            tracing::error!(error = %e, "string tables unreadable");
            Self {
                tables: BTreeMap::new(),
                default_namespace: default_namespace.to_string(),
                policy,
                dropped: vec![e.to_string()],
            }
        })
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Entries dropped at load time because of their shape.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    fn raw(&self, namespace: &str, locale: Locale, key: &str) -> Option<&str> {
        self.tables
            .get(namespace)?
            .get(&locale)?
            .get(key)
            .map(String::as_str)
    }

    /// Look up a template, applying the fallback policy.
    ///
    /// When nothing in the fallback chain has the key, lenient mode returns
    /// the key itself so the page still renders.
    pub fn get<'a>(
        &'a self,
        namespace: &str,
        locale: Locale,
        key: &'a str,
    ) -> Result<&'a str, I18nError> {
        if let Some(s) = self.raw(namespace, locale, key) {
            return Ok(s);
        }
        if self.policy == FallbackPolicy::Strict {
            return Err(I18nError::MissingKey {
                namespace: namespace.to_string(),
                locale,
                key: key.to_string(),
            });
        }

        let fallback = self
            .raw(&self.default_namespace, locale, key)
            .or_else(|| self.raw(&self.default_namespace, Locale::DEFAULT, key));
        match fallback {
            Some(s) => {
                tracing::warn!(
                    namespace,
                    %locale,
                    key,
                    fallback = %self.default_namespace,
                    "missing translation, using default namespace"
                );
                Ok(s)
            }
            None => {
                tracing::error!(namespace, %locale, key, "missing translation with no fallback");
                Ok(key)
            }
        }
    }

    /// Look up a template and interpolate `vars` into it.
    pub fn text(
        &self,
        namespace: &str,
        locale: Locale,
        key: &str,
        vars: &[(&str, &str)],
    ) -> Result<String, I18nError> {
        let template = self.get(namespace, locale, key)?;
        Ok(interpolate(template, vars))
    }

    /// Every [`REQUIRED_KEYS`] entry missing from its own namespace,
    /// ignoring fallbacks.
    pub fn missing_keys(&self) -> Vec<I18nError> {
        let mut missing = Vec::new();
        for (namespace, keys) in REQUIRED_KEYS {
            for locale in Locale::ALL {
                for key in *keys {
                    if self.raw(namespace, locale, key).is_none() {
                        missing.push(I18nError::MissingKey {
                            namespace: namespace.to_string(),
                            locale,
                            key: key.to_string(),
                        });
                    }
                }
            }
        }
        missing
    }
}

fn drop_entry(dropped: &mut Vec<String>, what: String) {
    tracing::warn!(entry = %what, "dropping malformed string table entry");
    dropped.push(what);
}

/// Replace `{name}` placeholders with values from `vars`.
///
/// Unknown placeholders and unbalanced braces are left as written.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match vars.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
