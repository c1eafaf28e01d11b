//! Slug-keyed entity registries.
//!
//! The site's generated pages are driven by three small, hand-curated
//! catalogs: industries, competitor comparisons and glossary terms. Each is
//! authored as TOML under `content/`, embedded into the binary at compile
//! time and parsed once into a [`Registry`] that lives for the process.
//!
//! ## Loading
//!
//! Records are deserialized one at a time. A record that doesn't match the
//! expected shape, fails its own validation, or repeats a slug that was
//! already loaded is dropped with a warning and remembered as a
//! [`Rejected`] entry. Page generation keeps working on whatever loaded;
//! `check` turns the rejections into a failing report.
//!
//! ```text
//! content/industries.toml   [[industry]]    → Registry<IndustryData>
//! content/comparisons.toml  [[comparison]]  → Registry<ComparisonData>
//! content/glossary.toml     [[term]]        → Registry<GlossaryTerm>
//! ```
//!
//! Slugs are unique within a registry, and [`Registry::slugs`] preserves
//! declaration order.

pub mod comparison;
pub mod glossary;
pub mod industry;

pub use comparison::{ComparisonData, ComparisonType, Contrast, FeatureRow};
pub use glossary::{CodeExample, GlossaryTerm};
pub use industry::IndustryData;

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("expected an array of tables under `{0}`")]
    MissingTable(String),
}

/// A record that can be stored in a [`Registry`].
pub trait Entity: DeserializeOwned {
    /// Table key the records are listed under (`[[industry]]`, ...).
    const TABLE: &'static str;

    fn slug(&self) -> &str;

    fn name(&self) -> &str;

    /// Record-level validation run after deserialization.
    fn validate(&self) -> Result<(), String> {
        if self.slug().trim().is_empty() {
            return Err("empty slug".into());
        }
        Ok(())
    }
}

/// A record dropped during loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// Position of the record in the source array.
    pub index: usize,
    /// Slug if one could be read from the raw record.
    pub slug: Option<String>,
    pub reason: String,
}

/// An ordered, slug-indexed collection of records.
#[derive(Debug)]
pub struct Registry<T> {
    records: Vec<T>,
    by_slug: HashMap<String, usize>,
    rejected: Vec<Rejected>,
}

impl<T: Entity> Registry<T> {
    /// Build a registry from already-typed records.
    ///
    /// Later duplicates of a slug are rejected, not overwritten.
    pub fn from_records(records: Vec<T>) -> Self {
        let mut registry = Self {
            records: Vec::with_capacity(records.len()),
            by_slug: HashMap::new(),
            rejected: Vec::new(),
        };
        for (index, record) in records.into_iter().enumerate() {
            registry.push(index, record);
        }
        registry
    }

    /// Parse a TOML document holding an array of `[[T::TABLE]]` records.
    ///
    /// Fails only when the document itself is unreadable; individual
    /// records that don't conform are dropped.
    pub fn from_toml(source: &str) -> Result<Self, RegistryError> {
        let mut doc: toml::Table = toml::from_str(source)?;
        let items = match doc.remove(T::TABLE) {
            Some(toml::Value::Array(items)) => items,
            _ => return Err(RegistryError::MissingTable(T::TABLE.to_string())),
        };

        let mut registry = Self {
            records: Vec::with_capacity(items.len()),
            by_slug: HashMap::new(),
            rejected: Vec::new(),
        };

        for (index, item) in items.into_iter().enumerate() {
            let raw_slug = item
                .get("slug")
                .and_then(|s| s.as_str())
                .map(str::to_string);
            match item.try_into::<T>() {
                Ok(record) => registry.push(index, record),
                Err(e) => registry.reject(index, raw_slug, e.to_string()),
            }
        }

        Ok(registry)
    }

    /// Load from an embedded source, degrading to an empty registry.
    pub(crate) fn load_embedded(source: &str) -> Self {
        Self::from_toml(source).unwrap_or_else(|e| {
            tracing::error!(table = T::TABLE, error = %e, "content table unreadable");
            Self::from_records(Vec::new())
        })
    }

    fn push(&mut self, index: usize, record: T) {
        let slug = record.slug().to_string();
        if let Err(reason) = record.validate() {
            self.reject(index, Some(slug), reason);
            return;
        }
        if self.by_slug.contains_key(&slug) {
            self.reject(index, Some(slug), "duplicate slug".into());
            return;
        }
        self.by_slug.insert(slug, self.records.len());
        self.records.push(record);
    }

    fn reject(&mut self, index: usize, slug: Option<String>, reason: String) {
        tracing::warn!(
            table = T::TABLE,
            index,
            slug = slug.as_deref().unwrap_or("?"),
            %reason,
            "dropping malformed record"
        );
        self.rejected.push(Rejected {
            index,
            slug,
            reason,
        });
    }

    /// Look up a record by slug.
    pub fn get(&self, slug: &str) -> Option<&T> {
        self.by_slug.get(slug).map(|&i| &self.records[i])
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// All slugs in declaration order.
    pub fn slugs(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.slug()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records dropped while loading.
    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

const INDUSTRIES_TOML: &str = include_str!("../../content/industries.toml");
const COMPARISONS_TOML: &str = include_str!("../../content/comparisons.toml");
const GLOSSARY_TOML: &str = include_str!("../../content/glossary.toml");

/// The three registries the page generators read from.
#[derive(Debug)]
pub struct Catalog {
    pub industries: Registry<IndustryData>,
    pub comparisons: Registry<ComparisonData>,
    pub glossary: Registry<GlossaryTerm>,
}

impl Catalog {
    /// The catalog compiled into the binary, parsed on first use.
    pub fn builtin() -> &'static Catalog {
        static INSTANCE: OnceLock<Catalog> = OnceLock::new();
        INSTANCE.get_or_init(|| Catalog {
            industries: Registry::load_embedded(INDUSTRIES_TOML),
            comparisons: Registry::load_embedded(COMPARISONS_TOML),
            glossary: Registry::load_embedded(GLOSSARY_TOML),
        })
    }

    /// Build a catalog from TOML sources.
    pub fn from_toml(
        industries: &str,
        comparisons: &str,
        glossary: &str,
    ) -> Result<Catalog, RegistryError> {
        Ok(Catalog {
            industries: Registry::from_toml(industries)?,
            comparisons: Registry::from_toml(comparisons)?,
            glossary: Registry::from_toml(glossary)?,
        })
    }
}

pub fn get_industry_by_slug(slug: &str) -> Option<&'static IndustryData> {
    Catalog::builtin().industries.get(slug)
}

pub fn industry_slugs() -> Vec<&'static str> {
    Catalog::builtin().industries.slugs()
}

pub fn get_comparison_by_slug(slug: &str) -> Option<&'static ComparisonData> {
    Catalog::builtin().comparisons.get(slug)
}

pub fn comparison_slugs() -> Vec<&'static str> {
    Catalog::builtin().comparisons.slugs()
}

pub fn get_comparisons_by_type(kind: ComparisonType) -> Vec<&'static ComparisonData> {
    Catalog::builtin().comparisons.by_type(kind)
}

pub fn get_term_by_slug(slug: &str) -> Option<&'static GlossaryTerm> {
    Catalog::builtin().glossary.get(slug)
}

pub fn term_slugs() -> Vec<&'static str> {
    Catalog::builtin().glossary.slugs()
}

pub fn search_terms(query: &str) -> Vec<&'static GlossaryTerm> {
    Catalog::builtin().glossary.search(query)
}
