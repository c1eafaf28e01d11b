//! Industries targeted by persona pages.
//!
//! Each industry pairs with every service to produce a persona page
//! (`/services/{service}/for-{industry}`). No relationships between
//! industries are stored; "related industries" is computed by
//! [`crate::relations`].

use super::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndustryData {
    pub slug: String,
    pub name: String,
    pub description: String,
    /// Billing problems this industry runs into, most pressing first.
    pub pain_points: Vec<String>,
    pub example_companies: Vec<String>,
    /// Tools the industry's stack typically has to integrate with.
    pub integrations: Vec<String>,
    /// Scales a service's base timeline. Must be non-negative.
    pub timeline_multiplier: f64,
    pub seo_keywords: Vec<String>,
    pub company_size: String,
    pub funding_stage: String,
}

impl Entity for IndustryData {
    const TABLE: &'static str = "industry";

    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        if self.slug.trim().is_empty() {
            return Err("empty slug".into());
        }
        if !self.timeline_multiplier.is_finite() || self.timeline_multiplier < 0.0 {
            return Err(format!(
                "timeline_multiplier must be >= 0, got {}",
                self.timeline_multiplier
            ));
        }
        Ok(())
    }
}

impl IndustryData {
    /// Weeks needed for a service with `base_weeks`, at least one.
    pub fn adjusted_weeks(&self, base_weeks: u32) -> u32 {
        let weeks = (f64::from(base_weeks) * self.timeline_multiplier).ceil() as u32;
        weeks.max(1)
    }
}
