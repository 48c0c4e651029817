//! Synthesized analysis output.
//!
//! These numbers are simulated from the listing, not looked up anywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! labelled {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Lowercase, hyphenated form used as a CSS class.
            pub fn css_class(self) -> String {
                self.label().to_lowercase().replace(' ', "-")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled!(MarketPosition { Low => "Low", Average => "Average", High => "High" });

labelled!(RentAffordability {
    Excellent => "Excellent",
    Good => "Good",
    Fair => "Fair",
    Poor => "Poor",
});

labelled!(Stability { Low => "Low", Medium => "Medium", High => "High" });

labelled!(CrimeLevel {
    VeryLow => "Very Low",
    Low => "Low",
    Moderate => "Moderate",
    High => "High",
    VeryHigh => "Very High",
});

labelled!(RiskLevel { Low => "Low", Medium => "Medium", High => "High" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAnalysis {
    pub median: i64,
    pub price_per_sqft: i64,
    pub median_price_per_sqft: i64,
    pub comps: Vec<i64>,
    pub market_position: MarketPosition,
    pub price_percentile: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedianIncome {
    pub median: i64,
    pub rent_affordability: RentAffordability,
    pub stability: Stability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeRisk {
    /// Composite score on 0..=100.
    pub score: f64,
    /// `score / 2`, floored, on 0..=50.
    pub index: u32,
    pub level: CrimeLevel,
    /// The address-only part of the score; stable for a given address.
    pub geographic: i32,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRisk {
    pub vacancy_rate: u32,
    /// Percent, unrounded.
    pub population_growth: f64,
    /// Percent, unrounded.
    pub job_growth: f64,
    pub overall_risk: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentViability {
    pub nearby_institutions: u32,
    pub viable: bool,
    /// Present only when viable.
    pub rent_boost: Option<u32>,
    /// Present only when viable.
    pub vacancy_reduction: Option<u32>,
}

/// Race/ethnicity shares in percent. Always sums to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub white: i32,
    pub black: i32,
    pub hispanic: i32,
    pub asian: i32,
    pub other: i32,
}

impl Demographics {
    pub fn buckets(&self) -> [(&'static str, i32); 5] {
        [
            ("White", self.white),
            ("Black", self.black),
            ("Hispanic", self.hispanic),
            ("Asian", self.asian),
            ("Other", self.other),
        ]
    }

    pub fn total(&self) -> i32 {
        self.buckets().iter().map(|(_, share)| share).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub price_analysis: PriceAnalysis,
    pub median_income: MedianIncome,
    pub crime_risk: CrimeRisk,
    pub market_risk: MarketRisk,
    pub rent_viability: RentViability,
    pub demographics: Demographics,
}
