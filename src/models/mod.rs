use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod analysis;

pub use analysis::{
    AnalysisResult, CrimeLevel, CrimeRisk, Demographics, MarketPosition, MarketRisk,
    MedianIncome, PriceAnalysis, RentAffordability, RentViability, RiskLevel, Stability,
};

/// Listing site a record was scraped from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Source {
    Zillow,
    Redfin,
    #[serde(rename = "Realtor.com")]
    Realtor,
    #[serde(rename = "Test Page")]
    TestFixture,
}

impl Source {
    pub fn label(self) -> &'static str {
        match self {
            Source::Zillow => "Zillow",
            Source::Redfin => "Redfin",
            Source::Realtor => "Realtor.com",
            Source::TestFixture => "Test Page",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attributes scraped from one listing page.
///
/// Every attribute is optional and none is checked for plausibility; the
/// analyzer substitutes its defaults for whatever is missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub source: Source,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_footage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl PropertyRecord {
    /// Empty record captured now.
    pub fn new(source: Source, url: impl Into<String>) -> Self {
        Self {
            source,
            url: url.into(),
            timestamp: Utc::now(),
            address: None,
            price: None,
            bedrooms: None,
            bathrooms: None,
            square_footage: None,
            year_built: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Names of the attributes that are still missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.address.is_none() {
            missing.push("address");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if self.bedrooms.is_none() {
            missing.push("bedrooms");
        }
        if self.bathrooms.is_none() {
            missing.push("bathrooms");
        }
        if self.square_footage.is_none() {
            missing.push("squareFootage");
        }
        if self.year_built.is_none() {
            missing.push("yearBuilt");
        }
        if self.latitude.is_none() || self.longitude.is_none() {
            missing.push("coordinates");
        }
        missing
    }
}
