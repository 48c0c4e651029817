use rand::Rng;

use crate::analysis::Listing;
use crate::config::ScoringConfig;
use crate::models::{MarketPosition, PriceAnalysis};

const MIN_MEDIAN: f64 = 200_000.0;
const MAX_MEDIAN: f64 = 2_000_000.0;

pub fn analyze<R: Rng>(listing: &Listing<'_>, config: &ScoringConfig, rng: &mut R) -> PriceAnalysis {
    let median = median_price(listing, rng);
    let sqft = listing.square_footage as f64;
    let comps = comparables(listing.price, config.comp_count, rng);
    let price_percentile = percentile(listing.price, &comps);

    PriceAnalysis {
        median: median.floor() as i64,
        price_per_sqft: (listing.price as f64 / sqft).round() as i64,
        median_price_per_sqft: (median / sqft).round() as i64,
        comps,
        market_position: market_position(price_percentile),
        price_percentile,
    }
}

/// Listed price shifted by $50k per bedroom away from 3, $25k per bathroom
/// away from 2 and $100 per square foot away from 2,000, then jittered by
/// up to ±15%.
pub fn median_price<R: Rng>(listing: &Listing<'_>, rng: &mut R) -> f64 {
    let mut median = listing.price as f64;
    median += (f64::from(listing.bedrooms) - 3.0) * 50_000.0;
    median += (listing.bathrooms - 2.0) * 25_000.0;
    median += (listing.square_footage as f64 - 2000.0) * 100.0;
    median *= 1.0 + rng.gen_range(-0.15..0.15);
    median.clamp(MIN_MEDIAN, MAX_MEDIAN)
}

/// `count` synthetic sale prices within ±20% of `base`.
pub fn comparables<R: Rng>(base: i64, count: usize, rng: &mut R) -> Vec<i64> {
    (0..count)
        .map(|_| (base as f64 * (1.0 + rng.gen_range(-0.2..0.2))).floor() as i64)
        .collect()
}

/// Rank of `price` among `comps`: the share of comps strictly below it,
/// in whole percent. A price above every comp is the 100th percentile.
pub fn percentile(price: i64, comps: &[i64]) -> u32 {
    let mut sorted = comps.to_vec();
    sorted.sort_unstable();
    match sorted.iter().position(|&comp| comp >= price) {
        Some(position) => ((position as f64 / sorted.len() as f64) * 100.0).round() as u32,
        None => 100,
    }
}

pub fn market_position(percentile: u32) -> MarketPosition {
    match percentile {
        0..=25 => MarketPosition::Low,
        26..=75 => MarketPosition::Average,
        _ => MarketPosition::High,
    }
}

/// Five-number summary of the comps for the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuartiles {
    pub min: i64,
    pub q1: i64,
    pub median: i64,
    pub q3: i64,
    pub max: i64,
}

impl PriceQuartiles {
    /// Nearest-rank quartiles: the value at rank `ceil(n * p)`. `None`
    /// without comps.
    pub fn from_comps(comps: &[i64]) -> Option<Self> {
        let mut sorted = comps.to_vec();
        sorted.sort_unstable();
        let at = |share: f64| {
            let rank = (sorted.len() as f64 * share).ceil() as usize;
            sorted[rank.clamp(1, sorted.len()) - 1]
        };

        Some(Self {
            min: *sorted.first()?,
            q1: at(0.25),
            median: at(0.5),
            q3: at(0.75),
            max: *sorted.last()?,
        })
    }
}
