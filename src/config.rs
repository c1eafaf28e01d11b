//! Generator configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! describe the production site; a `config.toml` in the source directory
//! overrides any subset of them (staging origins, stricter CI settings).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! origin = "https://ai.rio.br"   # No trailing slash
//! name = "Ai.Rio"
//! twitter_site = "@airio"
//! og_image = "/og-image.png"     # Site-relative path
//! logo = "/logo.png"
//! keywords = ["Ai.Rio", "usage-based billing", "Stripe billing", "billing implementation"]
//!
//! [translations]
//! fallback = "warn"              # "warn" or "strict"
//! default_namespace = "common"
//!
//! [related]
//! industries = 3                 # Other industries linked from persona pages
//! comparisons = 3                # Other comparisons linked from comparison pages
//! glossary = 4                   # Related terms shown on glossary pages
//!
//! [schema]
//! date_published = "2025-01-15"  # Article datePublished
//! date_modified = "2025-01-15"   # Article dateModified
//!
//! [processing]
//! max_processes = 4              # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [site]
//! origin = "https://staging.ai.rio.br"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::i18n::FallbackPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in URLs, OpenGraph and schema.org blocks.
    pub site: SiteSection,
    /// String table behavior.
    pub translations: TranslationsConfig,
    /// Caps for related-entity links.
    pub related: RelatedConfig,
    /// Structured-data literals.
    pub schema: SchemaConfig,
    /// Parallel build settings.
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub origin: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_site: Option<String>,
    pub og_image: String,
    pub logo: String,
    /// Locale-invariant platform keywords appended to every page.
    pub keywords: Vec<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            origin: "https://ai.rio.br".to_string(),
            name: "Ai.Rio".to_string(),
            twitter_site: Some("@airio".to_string()),
            og_image: "/og-image.png".to_string(),
            logo: "/logo.png".to_string(),
            keywords: vec![
                "Ai.Rio".to_string(),
                "usage-based billing".to_string(),
                "Stripe billing".to_string(),
                "billing implementation".to_string(),
            ],
        }
    }
}

impl SiteSection {
    /// Absolute URL for a site-relative asset path.
    pub fn asset_url(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslationsConfig {
    pub fallback: FallbackPolicy,
    /// Namespace consulted when a key is missing from its own.
    pub default_namespace: String,
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::Warn,
            default_namespace: "common".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelatedConfig {
    pub industries: usize,
    pub comparisons: usize,
    pub glossary: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            industries: 3,
            comparisons: 3,
            glossary: 4,
        }
    }
}

/// Fixed dates for `Article` blocks. Kept as literals so output is
/// byte-identical across builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub date_published: String,
    pub date_modified: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            date_published: "2025-01-15".to_string(),
            date_modified: "2025-01-15".to_string(),
        }
    }
}

/// Parallel build settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = &self.site.origin;
        if !(origin.starts_with("https://") || origin.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.origin must start with http:// or https://".into(),
            ));
        }
        if origin.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.origin must not end with a slash".into(),
            ));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.translations.default_namespace.trim().is_empty() {
            return Err(ConfigError::Validation(
                "translations.default_namespace must not be empty".into(),
            ));
        }
        for (key, value) in [
            ("schema.date_published", &self.schema.date_published),
            ("schema.date_modified", &self.schema.date_modified),
        ] {
            if !is_iso_date(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a YYYY-MM-DD date, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

fn is_iso_date(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return false;
    };
    let digits = |p: &str, len: usize| p.len() == len && p.bytes().all(|b| b.is_ascii_digit());
    if !(digits(year, 4) && digits(month, 2) && digits(day, 2)) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12)) && matches!(day.parse::<u8>(), Ok(1..=31))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Ai.Rio SEO generator configuration
# ==================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Origin used for canonical, hreflang and schema.org URLs. No trailing slash.
origin = "https://ai.rio.br"

# Organization name used in OpenGraph site_name and schema.org publisher.
name = "Ai.Rio"

# Twitter handle for twitter:site. Remove to omit the tag.
twitter_site = "@airio"

# Site-relative paths for the share image and the organization logo.
og_image = "/og-image.png"
logo = "/logo.png"

# Platform keywords appended to every page's keyword list.
keywords = ["Ai.Rio", "usage-based billing", "Stripe billing", "billing implementation"]

# ---------------------------------------------------------------------------
# String tables
# ---------------------------------------------------------------------------
[translations]
# What happens when a page asks for a string its namespace doesn't define:
#   "warn"   - use the default namespace's string and log a warning
#   "strict" - fail the page (use in CI to prove the tables are complete)
fallback = "warn"

# Namespace consulted for missing keys.
default_namespace = "common"

# ---------------------------------------------------------------------------
# Related links
# ---------------------------------------------------------------------------
[related]
# How many other industries a persona page links to.
industries = 3

# How many other comparisons a comparison page links to.
comparisons = 3

# How many declared related terms a glossary page shows.
glossary = 4

# ---------------------------------------------------------------------------
# Structured data
# ---------------------------------------------------------------------------
[schema]
# Fixed Article dates. Output stays identical between builds until these change.
date_published = "2025-01-15"
date_modified = "2025-01-15"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page workers during `build`.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_describes_production_site() {
        let config = SiteConfig::default();
        assert_eq!(config.site.origin, "https://ai.rio.br");
        assert_eq!(config.site.name, "Ai.Rio");
        assert_eq!(config.translations.fallback, FallbackPolicy::Warn);
        assert_eq!(config.translations.default_namespace, "common");
        assert_eq!(config.related.glossary, 4);
    }

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[site]
origin = "https://staging.ai.rio.br"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.origin, "https://staging.ai.rio.br");
        // Defaults preserved
        assert_eq!(config.site.name, "Ai.Rio");
        assert_eq!(config.related.industries, 3);
    }

    #[test]
    fn parse_strict_fallback() {
        let toml = r#"
[translations]
fallback = "strict"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.translations.fallback, FallbackPolicy::Strict);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
[site]
orgin = "https://typo.example"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn merge_keeps_sibling_defaults() {
        let overlay: toml::Value = toml::from_str("[site]\nname = \"Ai.Rio Staging\"\n").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.site.name, "Ai.Rio Staging");
        assert_eq!(config.site.origin, "https://ai.rio.br");
        assert_eq!(config.site.keywords.len(), 4);
    }

    #[test]
    fn trailing_slash_origin_is_invalid() {
        let mut config = SiteConfig::default();
        config.site.origin = "https://ai.rio.br/".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn non_http_origin_is_invalid() {
        let mut config = SiteConfig::default();
        config.site.origin = "ftp://ai.rio.br".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn malformed_dates_are_invalid() {
        for bad in ["2025-1-15", "15/01/2025", "2025-13-01", "", "2025-01-15T00:00:00Z"] {
            let mut config = SiteConfig::default();
            config.schema.date_modified = bad.into();
            assert!(config.validate().is_err(), "{bad}");
        }
    }

    #[test]
    fn asset_url_joins_origin() {
        let site = SiteSection::default();
        assert_eq!(site.asset_url("/logo.png"), "https://ai.rio.br/logo.png");
        assert_eq!(site.asset_url("og.png"), "https://ai.rio.br/og.png");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[related]
comparisons = 5

[schema]
date_modified = "2025-06-01"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.related.comparisons, 5);
        assert_eq!(config.schema.date_modified, "2025-06-01");
        assert_eq!(config.schema.date_published, "2025-01-15");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_merged_result() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\norigin = \"ai.rio.br\"\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig { max_processes: None };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }
}
