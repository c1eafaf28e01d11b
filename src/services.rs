//! The fixed set of services that persona pages are generated for.
//!
//! Service ids are a closed set, not data-driven: adding one means adding a
//! [`ServiceConfig`] here. Names and delivery windows carry their own locale
//! map so persona pages don't depend on the shared string tables for them.

use crate::locale::{Locale, Localized};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceConfig {
    pub id: &'static str,
    pub name: Localized<&'static str>,
    /// Display price, e.g. `"$4,997"`.
    pub price: &'static str,
    /// Machine-readable price for `Offer.price`.
    pub price_amount: &'static str,
    pub currency: &'static str,
    pub delivery_window: Localized<&'static str>,
    /// Baseline implementation time, scaled by an industry's multiplier.
    pub base_weeks: u32,
}

impl ServiceConfig {
    pub fn name(&self, locale: Locale) -> &'static str {
        *self.name.get(locale)
    }

    pub fn delivery_window(&self, locale: Locale) -> &'static str {
        *self.delivery_window.get(locale)
    }

    /// Site path of the service landing page.
    pub fn path(&self) -> String {
        format!("/services/{}", self.id)
    }
}

pub const SERVICES: &[ServiceConfig] = &[
    ServiceConfig {
        id: "usage-based-billing",
        name: Localized {
            en: "Usage-Based Billing Implementation",
            es: "Implementación de Facturación por Uso",
            pt: "Implementação de Cobrança por Uso",
        },
        price: "$4,997",
        price_amount: "4997",
        currency: "USD",
        delivery_window: Localized {
            en: "2-4 weeks",
            es: "2-4 semanas",
            pt: "2-4 semanas",
        },
        base_weeks: 3,
    },
    ServiceConfig {
        id: "stripe-integration",
        name: Localized {
            en: "Stripe Billing Integration",
            es: "Integración con Stripe Billing",
            pt: "Integração com Stripe Billing",
        },
        price: "$2,997",
        price_amount: "2997",
        currency: "USD",
        delivery_window: Localized {
            en: "1-2 weeks",
            es: "1-2 semanas",
            pt: "1-2 semanas",
        },
        base_weeks: 2,
    },
    ServiceConfig {
        id: "billing-migration",
        name: Localized {
            en: "Billing Migration to Stripe",
            es: "Migración de Facturación a Stripe",
            pt: "Migração de Cobrança para o Stripe",
        },
        price: "$7,997",
        price_amount: "7997",
        currency: "USD",
        delivery_window: Localized {
            en: "3-6 weeks",
            es: "3-6 semanas",
            pt: "3-6 semanas",
        },
        base_weeks: 5,
    },
];

/// Look up a service by id.
pub fn get_service(id: &str) -> Option<&'static ServiceConfig> {
    SERVICES.iter().find(|s| s.id == id)
}

pub fn service_ids() -> impl Iterator<Item = &'static str> {
    SERVICES.iter().map(|s| s.id)
}
