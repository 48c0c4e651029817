//! Synthesized neighbourhood analysis for a scraped listing.
//!
//! Nothing here queries real data. Geography-dependent terms come from a
//! hash of the address and are stable per address; everything else is drawn
//! from the analyzer's random source, so only a seeded analyzer reproduces
//! its output.

pub mod crime;
pub mod demographics;
pub mod hash;
pub mod income;
pub mod market;
pub mod price;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::ScoringConfig;
use crate::models::{AnalysisResult, PropertyRecord};

pub use hash::address_hash;

/// A record with the scoring defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    pub address: &'a str,
    pub hash: u32,
    pub price: i64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_footage: i64,
    pub year_built: i32,
}

impl<'a> Listing<'a> {
    /// Missing and zero values both take the configured default.
    pub fn resolve(record: &'a PropertyRecord, defaults: &ScoringConfig) -> Self {
        let address = record
            .address
            .as_deref()
            .filter(|address| !address.is_empty())
            .unwrap_or(hash::UNKNOWN_ADDRESS);

        Self {
            address,
            hash: address_hash(address),
            price: record.price.filter(|&p| p > 0).unwrap_or(defaults.default_price),
            bedrooms: record
                .bedrooms
                .filter(|&b| b > 0)
                .unwrap_or(defaults.default_bedrooms),
            bathrooms: record
                .bathrooms
                .filter(|&b| b > 0.0)
                .unwrap_or(defaults.default_bathrooms),
            square_footage: record
                .square_footage
                .filter(|&s| s > 0)
                .unwrap_or(defaults.default_square_footage),
            year_built: record
                .year_built
                .filter(|&y| y > 0)
                .unwrap_or(defaults.default_year_built),
        }
    }
}

/// Scores property records into an [`AnalysisResult`].
pub struct Analyzer<R = StdRng> {
    config: ScoringConfig,
    rng: R,
}

impl Analyzer<StdRng> {
    /// Analyzer with fresh entropy and default scoring knobs.
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default(), StdRng::from_entropy())
    }

    /// Reproducible analyzer for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_config(ScoringConfig::default(), StdRng::seed_from_u64(seed))
    }
}

impl Default for Analyzer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Analyzer<R> {
    pub fn with_config(config: ScoringConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `record` immediately.
    pub fn analyze(&mut self, record: &PropertyRecord) -> AnalysisResult {
        let listing = Listing::resolve(record, &self.config);
        debug!(?listing, "Scoring listing");

        let result = AnalysisResult {
            price_analysis: price::analyze(&listing, &self.config, &mut self.rng),
            median_income: income::analyze(&listing, &self.config),
            crime_risk: crime::assess(&listing, &mut self.rng),
            market_risk: market::market_risk(&mut self.rng),
            rent_viability: market::rent_viability(&self.config, &mut self.rng),
            demographics: demographics::generate(&mut self.rng),
        };

        info!(
            "Analysis for {}: crime {} ({}/50), market risk {}",
            listing.address,
            result.crime_risk.level,
            result.crime_risk.index,
            result.market_risk.overall_risk
        );
        result
    }

    /// Score `record` after the configured simulated lookup delay.
    pub async fn analyze_delayed(&mut self, record: &PropertyRecord) -> AnalysisResult {
        let delay = self.config.analysis_delay();
        if !delay.is_zero() {
            debug!("Simulating data lookup for {:?}", delay);
            tokio::time::sleep(delay).await;
        }
        self.analyze(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrimeLevel, Source};

    fn compton() -> PropertyRecord {
        let mut record = PropertyRecord::new(Source::TestFixture, "file:///test.html");
        record.address = Some("123 Main St, Compton".to_string());
        record.price = Some(90_000);
        record.bedrooms = Some(1);
        record.square_footage = Some(700);
        record.year_built = Some(1940);
        record
    }

    #[test]
    fn empty_record_uses_defaults() {
        let record = PropertyRecord::new(Source::TestFixture, "file:///test.html");
        let listing = Listing::resolve(&record, &ScoringConfig::default());

        assert_eq!(listing.address, "Unknown");
        assert_eq!(listing.price, 500_000);
        assert_eq!(listing.bedrooms, 3);
        assert_eq!(listing.bathrooms, 2.0);
        assert_eq!(listing.square_footage, 2000);
        assert_eq!(listing.year_built, 2000);
    }

    #[test]
    fn zero_values_count_as_missing() {
        let mut record = PropertyRecord::new(Source::Zillow, "https://www.zillow.com/x");
        record.price = Some(0);
        record.square_footage = Some(0);
        let listing = Listing::resolve(&record, &ScoringConfig::default());
        assert_eq!(listing.price, 500_000);
        assert_eq!(listing.square_footage, 2000);
    }

    #[test]
    fn empty_record_is_fully_scored() {
        let record = PropertyRecord::new(Source::TestFixture, "file:///test.html");
        let result = Analyzer::seeded(7).analyze(&record);

        assert_eq!(result.price_analysis.comps.len(), 10);
        assert_eq!(result.price_analysis.price_per_sqft, 250);
        assert!((200_000..=2_000_000).contains(&result.price_analysis.median));
        assert!((30_000..=200_000).contains(&result.median_income.median));
        assert!((0.0..=100.0).contains(&result.crime_risk.score));
        assert_eq!(result.demographics.total(), 100);
    }

    #[test]
    fn compton_scenario_is_high_risk() {
        let record = compton();
        for seed in 0..50 {
            let result = Analyzer::seeded(seed).analyze(&record);
            assert!(
                result.crime_risk.level >= CrimeLevel::High,
                "seed {seed} scored {:?}",
                result.crime_risk
            );
        }
    }

    #[test]
    fn geographic_term_is_stable_per_address() {
        let mut record = PropertyRecord::new(Source::Redfin, "https://www.redfin.com/x");
        record.address = Some("221B Baker Street, Los Angeles, CA 90012".to_string());

        let first = Analyzer::seeded(1).analyze(&record);
        let second = Analyzer::seeded(2).analyze(&record);
        assert_eq!(first.crime_risk.geographic, second.crime_risk.geographic);
        assert_eq!(first.median_income.median, second.median_income.median);
    }

    #[test]
    fn same_seed_reproduces_everything() {
        let record = compton();
        let a = Analyzer::seeded(42).analyze(&record);
        let b = Analyzer::seeded(42).analyze(&record);
        assert_eq!(a, b);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_analysis_waits_for_configured_delay() {
        let record = compton();
        let mut analyzer = Analyzer::seeded(3);
        let started = tokio::time::Instant::now();
        analyzer.analyze_delayed(&record).await;
        assert!(started.elapsed() >= analyzer.config().analysis_delay());
    }
}
