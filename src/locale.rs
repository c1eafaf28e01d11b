//! Supported locales and locale-aware URL construction.
//!
//! The site serves exactly three locales. English is the default and is
//! served without a path segment; the others get a `/{locale}` prefix right
//! after the origin ("as-needed" prefixing):
//!
//! ```text
//! en  https://ai.rio.br/glossary/proration
//! es  https://ai.rio.br/es/glossary/proration
//! pt  https://ai.rio.br/pt/glossary/proration
//! ```
//!
//! OpenGraph uses its own region-qualified codes (`en_US`, `es_ES`, `pt_BR`),
//! which are not interchangeable with the path codes above.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
    Pt,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Pt];

    /// The locale served without a path prefix.
    pub const DEFAULT: Locale = Locale::En;

    /// Path / hreflang code.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Pt => "pt",
        }
    }

    /// OpenGraph `og:locale` code.
    pub fn og_code(self) -> &'static str {
        match self {
            Locale::En => "en_US",
            Locale::Es => "es_ES",
            Locale::Pt => "pt_BR",
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    /// The other supported locales, in [`Locale::ALL`] order.
    pub fn others(self) -> impl Iterator<Item = Locale> {
        Self::ALL.into_iter().filter(move |l| *l != self)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            "pt" => Ok(Locale::Pt),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// One value per supported locale.
///
/// Exhaustive by construction: a `Localized` cannot be built without all three
/// values, so lookups never miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Localized<T> {
    pub en: T,
    pub es: T,
    pub pt: T,
}

impl<T> Localized<T> {
    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
            Locale::Pt => &self.pt,
        }
    }
}

/// Build an absolute URL for `path` in `locale`.
///
/// The default locale gets no segment; every other locale is inserted
/// directly after the origin. A trailing slash on the origin and a missing
/// leading slash on the path are both tolerated. The site root in a
/// non-default locale is `{origin}/{locale}` without a trailing slash.
pub fn build_url(origin: &str, path: &str, locale: Locale) -> String {
    let origin = origin.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    match (locale.is_default(), path.is_empty()) {
        (true, true) => format!("{origin}/"),
        (true, false) => format!("{origin}/{path}"),
        (false, true) => format!("{origin}/{}", locale.code()),
        (false, false) => format!("{origin}/{}/{path}", locale.code()),
    }
}
