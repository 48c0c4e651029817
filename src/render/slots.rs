//! Named display slots filled from a record and its analysis.

use crate::models::{AnalysisResult, PropertyRecord};
use crate::render::format::{currency, one_decimal_percent, thousands};

pub const PRICE_CHART: &str = "price-comparison-chart";
pub const DEMOGRAPHICS_CHART: &str = "demographics-chart";

/// Every text slot, in panel order. The two chart slots are filled by the
/// chart renderer.
pub const SLOT_IDS: [&str; 20] = [
    "source-badge",
    "median-price",
    "price-per-sqft",
    "median-price-per-sqft",
    "market-position",
    "price-percentile",
    "median-income",
    "rent-affordability",
    "neighborhood-stability",
    "crime-risk-score",
    "crime-risk-level",
    "crime-risk-factors",
    "vacancy-rate",
    "population-growth",
    "job-growth",
    "overall-market-risk",
    "nearby-institutions",
    "rent-boost",
    "vacancy-reduction",
    "rent-viability-status",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    List(Vec<String>),
}

impl Content {
    /// Single-line form for terminals.
    pub fn plain(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::List(items) => items.join("; "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: &'static str,
    pub content: Content,
    /// CSS class for badge-style slots.
    pub class: Option<String>,
}

impl Slot {
    fn text(id: &'static str, text: impl Into<String>) -> Self {
        Self {
            id,
            content: Content::Text(text.into()),
            class: None,
        }
    }

    fn badge(id: &'static str, text: impl Into<String>, class: String) -> Self {
        Self {
            class: Some(class),
            ..Self::text(id, text)
        }
    }
}

pub fn slots(record: &PropertyRecord, analysis: &AnalysisResult) -> Vec<Slot> {
    let price = &analysis.price_analysis;
    let income = &analysis.median_income;
    let crime = &analysis.crime_risk;
    let market = &analysis.market_risk;
    let rent = &analysis.rent_viability;

    let percent_or_na = |value: Option<u32>| match value {
        Some(value) if rent.viable => format!("{value}%"),
        _ => "N/A".to_string(),
    };

    vec![
        Slot::text("source-badge", record.source.label()),
        Slot::text("median-price", currency(price.median)),
        Slot::text("price-per-sqft", currency(price.price_per_sqft)),
        Slot::text("median-price-per-sqft", currency(price.median_price_per_sqft)),
        Slot::badge(
            "market-position",
            price.market_position.label(),
            format!("market-position {}", price.market_position.css_class()),
        ),
        Slot::text("price-percentile", format!("{}%", price.price_percentile)),
        Slot::text("median-income", currency(income.median)),
        Slot::text("rent-affordability", income.rent_affordability.label()),
        Slot::badge(
            "neighborhood-stability",
            income.stability.label(),
            format!("stability-badge {}", income.stability.css_class()),
        ),
        Slot::text("crime-risk-score", format!("{:.1}", crime.score)),
        Slot::badge(
            "crime-risk-level",
            crime.level.label(),
            format!("risk-level {}", crime.level.css_class()),
        ),
        Slot {
            id: "crime-risk-factors",
            content: Content::List(crime.factors.clone()),
            class: None,
        },
        Slot::text("vacancy-rate", format!("{}%", market.vacancy_rate)),
        Slot::text("population-growth", one_decimal_percent(market.population_growth)),
        Slot::text("job-growth", one_decimal_percent(market.job_growth)),
        Slot::badge(
            "overall-market-risk",
            market.overall_risk.label(),
            format!("risk-level {}", market.overall_risk.css_class()),
        ),
        Slot::text("nearby-institutions", thousands(i64::from(rent.nearby_institutions))),
        Slot::text("rent-boost", percent_or_na(rent.rent_boost)),
        Slot::text("vacancy-reduction", percent_or_na(rent.vacancy_reduction)),
        if rent.viable {
            Slot::badge("rent-viability-status", "Viable", "viability-status viable".to_string())
        } else {
            Slot::badge(
                "rent-viability-status",
                "Not Viable",
                "viability-status not-viable".to_string(),
            )
        },
    ]
}
