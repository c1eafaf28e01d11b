//! FAQ content projected from entity fields.
//!
//! There is no separately authored FAQ source. Each page type turns the
//! fields it already has (pain points, "when to choose" lists, definitions)
//! into question/answer pairs through the string tables, so editing a record
//! changes its FAQ on the next build.
//!
//! Lists are summarized by their first [`FAQ_LIST_ITEMS`] entries. Questions
//! whose source list is empty are left out.

use crate::context::SeoContext;
use crate::i18n::I18nError;
use crate::locale::Locale;
use crate::registry::{ComparisonData, GlossaryTerm, IndustryData};
use crate::services::ServiceConfig;
use serde::Serialize;

/// How many list entries an answer quotes.
pub const FAQ_LIST_ITEMS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// First `n` items joined into one clause.
fn summarize(items: &[String], n: usize, separator: &str) -> String {
    items
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Question/answer builder bound to one namespace and locale.
struct Projector<'a> {
    ctx: &'a SeoContext,
    namespace: &'static str,
    locale: Locale,
    faqs: Vec<Faq>,
}

impl<'a> Projector<'a> {
    fn new(ctx: &'a SeoContext, namespace: &'static str, locale: Locale) -> Self {
        Self {
            ctx,
            namespace,
            locale,
            faqs: Vec::new(),
        }
    }

    fn text(&self, key: &str, vars: &[(&str, &str)]) -> Result<String, I18nError> {
        self.ctx.text(self.namespace, self.locale, key, vars)
    }

    /// Question from `q_key`, answer given verbatim.
    fn push_plain(
        &mut self,
        q_key: &str,
        vars: &[(&str, &str)],
        answer: String,
    ) -> Result<(), I18nError> {
        let question = self.text(q_key, vars)?;
        self.faqs.push(Faq { question, answer });
        Ok(())
    }

    /// Question and answer both from templates; the answer also gets `extra`.
    fn push_templated(
        &mut self,
        key: &str,
        vars: &[(&str, &str)],
        extra: &[(&str, &str)],
    ) -> Result<(), I18nError> {
        let question = self.text(&format!("{key}_q"), vars)?;
        let answer_vars: Vec<(&str, &str)> = vars.iter().chain(extra).copied().collect();
        let answer = self.text(&format!("{key}_a"), &answer_vars)?;
        self.faqs.push(Faq { question, answer });
        Ok(())
    }

    fn finish(self) -> Vec<Faq> {
        self.faqs
    }
}

pub fn comparison_faqs(
    ctx: &SeoContext,
    comparison: &ComparisonData,
    locale: Locale,
) -> Result<Vec<Faq>, I18nError> {
    let vars = [("name", comparison.name.as_str())];
    let mut p = Projector::new(ctx, "comparison", locale);

    p.push_plain(
        "faq_difference_q",
        &vars,
        format!("{} {}", comparison.description, comparison.verdict),
    )?;

    if !comparison.when_to_choose_alternative.is_empty() {
        let items = summarize(&comparison.when_to_choose_alternative, FAQ_LIST_ITEMS, "; ");
        p.push_templated("faq_choose_alt", &vars, &[("items", items.as_str())])?;
    }
    if !comparison.when_to_choose_ai_rio.is_empty() {
        let items = summarize(&comparison.when_to_choose_ai_rio, FAQ_LIST_ITEMS, "; ");
        p.push_templated("faq_choose_us", &vars, &[("items", items.as_str())])?;
    }

    p.push_templated(
        "faq_cost",
        &vars,
        &[
            ("alternative", comparison.cost.alternative.as_str()),
            ("ai_rio", comparison.cost.ai_rio.as_str()),
        ],
    )?;
    p.push_templated(
        "faq_timeline",
        &vars,
        &[
            ("alternative", comparison.timeline.alternative.as_str()),
            ("ai_rio", comparison.timeline.ai_rio.as_str()),
        ],
    )?;

    Ok(p.finish())
}

pub fn glossary_faqs(
    ctx: &SeoContext,
    term: &GlossaryTerm,
    locale: Locale,
) -> Result<Vec<Faq>, I18nError> {
    let vars = [("name", term.name.as_str())];
    let mut p = Projector::new(ctx, "glossary", locale);

    p.push_plain("faq_what_q", &vars, term.definition.clone())?;
    p.push_plain("faq_why_q", &vars, term.why_it_matters.clone())?;
    if !term.common_mistakes.is_empty() {
        let items = summarize(&term.common_mistakes, FAQ_LIST_ITEMS, "; ");
        p.push_templated("faq_mistakes", &vars, &[("items", items.as_str())])?;
    }

    Ok(p.finish())
}

pub fn persona_faqs(
    ctx: &SeoContext,
    service: &ServiceConfig,
    industry: &IndustryData,
    locale: Locale,
) -> Result<Vec<Faq>, I18nError> {
    let vars = [
        ("service", service.name(locale)),
        ("industry", industry.name.as_str()),
        ("price", service.price),
        ("window", service.delivery_window(locale)),
    ];
    let mut p = Projector::new(ctx, "persona", locale);

    if !industry.pain_points.is_empty() {
        let items = summarize(&industry.pain_points, FAQ_LIST_ITEMS, "; ");
        p.push_templated("faq_challenges", &vars, &[("items", items.as_str())])?;
    }
    p.push_templated("faq_price", &vars, &[])?;

    let weeks = industry.adjusted_weeks(service.base_weeks).to_string();
    p.push_templated("faq_timeline", &vars, &[("weeks", weeks.as_str())])?;

    if !industry.integrations.is_empty() {
        let items = summarize(&industry.integrations, industry.integrations.len(), ", ");
        p.push_templated("faq_integrations", &vars, &[("items", items.as_str())])?;
    }

    Ok(p.finish())
}
