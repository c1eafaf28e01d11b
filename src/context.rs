//! Everything a page generator reads: config, string tables and the catalog.

use crate::config::SiteConfig;
use crate::i18n::{I18nError, Translations};
use crate::locale::{Locale, build_url};
use crate::registry::Catalog;

#[derive(Debug, Clone)]
pub struct SeoContext {
    pub config: SiteConfig,
    pub strings: Translations,
    pub catalog: &'static Catalog,
}

impl SeoContext {
    /// Builtin catalog and string tables, with the fallback policy from `config`.
    pub fn new(config: SiteConfig) -> Self {
        let strings = Translations::builtin(
            &config.translations.default_namespace,
            config.translations.fallback,
        );
        Self {
            config,
            strings,
            catalog: Catalog::builtin(),
        }
    }

    pub fn with_catalog(mut self, catalog: &'static Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_strings(mut self, strings: Translations) -> Self {
        self.strings = strings;
        self
    }

    /// Absolute URL for a site path in `locale`.
    pub fn url(&self, path: &str, locale: Locale) -> String {
        build_url(&self.config.site.origin, path, locale)
    }

    /// Interpolated string from the tables.
    pub fn text(
        &self,
        namespace: &str,
        locale: Locale,
        key: &str,
        vars: &[(&str, &str)],
    ) -> Result<String, I18nError> {
        self.strings.text(namespace, locale, key, vars)
    }
}

impl Default for SeoContext {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}
