use rand::Rng;

use crate::config::ScoringConfig;
use crate::models::{MarketRisk, RentViability, RiskLevel};

/// Growth figures are kept unrounded; the tally and the flags read them
/// as drawn and rounding happens only for display.
pub fn market_risk<R: Rng>(rng: &mut R) -> MarketRisk {
    let vacancy_rate = rng.gen_range(5..20);
    let population_growth = rng.gen_range(-5.0..5.0);
    let job_growth = rng.gen_range(-3.0..3.0);

    MarketRisk {
        vacancy_rate,
        population_growth,
        job_growth,
        overall_risk: overall_risk(vacancy_rate, population_growth, job_growth),
    }
}

/// Point tally over the three indicators.
pub fn overall_risk(vacancy_rate: u32, population_growth: f64, job_growth: f64) -> RiskLevel {
    let mut points = 0;

    points += match vacancy_rate {
        16.. => 3,
        11..=15 => 2,
        6..=10 => 1,
        _ => 0,
    };

    points += if population_growth < -2.0 {
        3
    } else if population_growth < 0.0 {
        2
    } else if population_growth < 2.0 {
        1
    } else {
        0
    };

    points += if job_growth < -1.0 {
        3
    } else if job_growth < 0.0 {
        2
    } else if job_growth < 1.0 {
        1
    } else {
        0
    };

    match points {
        0..=2 => RiskLevel::Low,
        3..=4 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

/// Indicators the panel flags individually.
pub fn flags(risk: &MarketRisk) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if risk.vacancy_rate > 10 {
        flags.push("High vacancy");
    }
    if risk.population_growth < 0.0 {
        flags.push("Shrinking population");
    }
    if risk.job_growth < 0.0 {
        flags.push("Job losses");
    }
    flags
}

/// Renting by the room pays off near enough schools and employers.
pub fn rent_viability<R: Rng>(config: &ScoringConfig, rng: &mut R) -> RentViability {
    let nearby_institutions = rng.gen_range(1..=8);
    let viable = nearby_institutions >= config.viability_minimum;

    let (rent_boost, vacancy_reduction) = if viable {
        (Some(rng.gen_range(10..30)), Some(rng.gen_range(5..20)))
    } else {
        (None, None)
    };

    RentViability {
        nearby_institutions,
        viable,
        rent_boost,
        vacancy_reduction,
    }
}
