use crate::analysis::Listing;
use crate::config::ScoringConfig;
use crate::models::{MedianIncome, RentAffordability, Stability};

const MIN_INCOME: f64 = 30_000.0;
const MAX_INCOME: f64 = 200_000.0;

pub fn analyze(listing: &Listing<'_>, config: &ScoringConfig) -> MedianIncome {
    let median = median_income(listing, config);
    MedianIncome {
        median,
        rent_affordability: rent_affordability(median, listing.price, config.rent_rate),
        stability: stability(median),
    }
}

/// Price over the income ratio, shifted up to ±15% by the address hash.
pub fn median_income(listing: &Listing<'_>, config: &ScoringConfig) -> i64 {
    let variation = (f64::from(listing.hash % 100) - 50.0) / 100.0;
    let income = listing.price as f64 / config.income_ratio * (1.0 + variation * 0.3);
    income.clamp(MIN_INCOME, MAX_INCOME).floor() as i64
}

/// Estimated monthly rent as a share of monthly income.
pub fn rent_affordability(income: i64, price: i64, rent_rate: f64) -> RentAffordability {
    let monthly_income = income as f64 / 12.0;
    let rent = price as f64 * rent_rate;
    let ratio = rent / monthly_income * 100.0;

    if ratio <= 25.0 {
        RentAffordability::Excellent
    } else if ratio <= 30.0 {
        RentAffordability::Good
    } else if ratio <= 35.0 {
        RentAffordability::Fair
    } else {
        RentAffordability::Poor
    }
}

pub fn stability(income: i64) -> Stability {
    match income {
        80_000.. => Stability::High,
        60_000..=79_999 => Stability::Medium,
        _ => Stability::Low,
    }
}
