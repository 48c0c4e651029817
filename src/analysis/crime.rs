//! Crime risk on a 0–100 scale.
//!
//! The score is 50 plus additive terms for price band, geography, building
//! age, unit size and bedroom count, plus up to ±5 points of jitter.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::analysis::Listing;
use crate::models::{CrimeLevel, CrimeRisk};

const BASE_SCORE: f64 = 50.0;

const HIGH_CRIME_AREAS: &[&str] = &[
    "bronx", "compton", "east la", "east los angeles", "south central", "watts", "inglewood",
    "lynwood", "paramount", "bell gardens", "huntington park", "south gate", "maywood", "cudahy",
    "bell", "florence-graham", "willowbrook", "firestone", "westmont", "east flatbush",
    "bedford-stuyvesant", "brownsville", "east new york", "flatbush", "crown heights", "bushwick",
    "east harlem", "south bronx", "morrisania", "mott haven", "highbridge", "concourse", "fordham",
    "university heights", "kingsbridge", "riverdale", "woodlawn", "wakefield", "edenwald",
    "baychester", "co-op city", "pelham gardens",
];

const LOW_CRIME_AREAS: &[&str] = &[
    "beverly hills", "bel air", "hollywood hills", "brentwood", "pacific palisades", "malibu",
    "manhattan beach", "hermosa beach", "redondo beach", "palos verdes", "rolling hills",
    "rancho palos verdes", "san marino", "arcadia", "la canada", "pasadena", "glendale", "burbank",
    "studio city", "sherman oaks", "encino", "tarzana", "woodland hills", "calabasas",
    "agoura hills", "westlake village", "thousand oaks", "newbury park", "moorpark",
    "upper east side", "upper west side", "tribeca", "soho", "west village", "greenwich village",
    "chelsea", "gramercy", "murray hill", "sutton place", "yorkville", "carnegie hill",
    "upper manhattan", "washington heights", "inwood", "riverdale", "fieldston", "spuyten duyvil",
    "kingsbridge", "woodlawn", "norwood", "bedford park", "kingsbridge heights",
];

/// Inclusive ZIP ranges and their adjustment; first match wins.
const ZIP_RISK: &[(u32, u32, i32)] = &[
    (10451, 10475, 20),  // Bronx
    (11201, 11256, 15),  // Brooklyn
    (10001, 10048, 10),  // Manhattan
    (90220, 90224, 25),  // Compton
    (90001, 90089, 15),  // Los Angeles
    (90210, 90212, -20), // Beverly Hills
    (90272, 90274, -15), // Palos Verdes
];

static ZIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5}\b").unwrap());

/// The address-only part of the score, with what contributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geography {
    pub term: i32,
    pub high_crime_area: Option<&'static str>,
    pub low_crime_area: Option<&'static str>,
    pub zip: Option<(String, i32)>,
}

/// Keyword, city, ZIP and hash-derived regional terms for `address`.
pub fn geography(address: &str, hash: u32) -> Geography {
    let lower = address.to_lowercase();
    let mut term = 0;

    let high_crime_area = HIGH_CRIME_AREAS.iter().copied().find(|area| lower.contains(area));
    if high_crime_area.is_some() {
        term += 30;
    }
    let low_crime_area = LOW_CRIME_AREAS.iter().copied().find(|area| lower.contains(area));
    if low_crime_area.is_some() {
        term -= 25;
    }

    if lower.contains("nyc") || lower.contains("new york city") {
        term += 5;
    }
    if lower.contains("los angeles") || lower.contains("la") {
        term += 3;
    }

    let zip = ZIP.find(address).map(|m| {
        let code = m.as_str().to_string();
        let risk = zip_risk(&code);
        (code, risk)
    });
    if let Some((_, risk)) = &zip {
        term += risk;
    }

    // Regional bias in -5..=5.
    term += (hash % 11) as i32 - 5;

    Geography {
        term,
        high_crime_area,
        low_crime_area,
        zip,
    }
}

pub fn zip_risk(zip: &str) -> i32 {
    let Ok(zip) = zip.parse::<u32>() else {
        return 0;
    };
    ZIP_RISK
        .iter()
        .find(|(low, high, _)| (*low..=*high).contains(&zip))
        .map_or(0, |(_, _, risk)| *risk)
}

/// Cheaper listings score as riskier.
pub fn price_term(price: i64) -> i32 {
    match price {
        ..=99_999 => 50,
        100_000..=149_999 => 40,
        150_000..=199_999 => 30,
        200_000..=299_999 => 20,
        300_000..=399_999 => 10,
        400_000..=599_999 => 5,
        600_000..=799_999 => -5,
        800_000..=1_199_999 => -15,
        _ => -25,
    }
}

pub fn age_term(year_built: i32) -> i32 {
    match year_built {
        ..=1949 => 15,
        1950..=1969 => 10,
        1970..=1989 => 5,
        2021.. => -10,
        _ => 0,
    }
}

pub fn size_term(square_footage: i64) -> i32 {
    match square_footage {
        ..=799 => 10,
        800..=1199 => 5,
        4001.. => -8,
        _ => 0,
    }
}

pub fn bedroom_term(bedrooms: u32) -> i32 {
    match bedrooms {
        0..=1 => 8,
        5.. => -5,
        _ => 0,
    }
}

pub fn level(index: u32) -> CrimeLevel {
    match index {
        0..=9 => CrimeLevel::VeryLow,
        10..=19 => CrimeLevel::Low,
        20..=29 => CrimeLevel::Moderate,
        30..=39 => CrimeLevel::High,
        _ => CrimeLevel::VeryHigh,
    }
}

pub fn assess<R: Rng>(listing: &Listing<'_>, rng: &mut R) -> CrimeRisk {
    let geography = geography(listing.address, listing.hash);

    let fixed = price_term(listing.price)
        + geography.term
        + age_term(listing.year_built)
        + size_term(listing.square_footage)
        + bedroom_term(listing.bedrooms);
    let jitter = rng.gen_range(-5.0..5.0);
    let score = (BASE_SCORE + f64::from(fixed) + jitter).clamp(0.0, 100.0);
    let index = (score / 2.0).floor() as u32;
    let level = level(index);

    CrimeRisk {
        score: (score * 10.0).round() / 10.0,
        index,
        level,
        geographic: geography.term,
        factors: factors(level, listing, &geography),
    }
}

/// Summary line for the band, then the concrete contributors.
fn factors(level: CrimeLevel, listing: &Listing<'_>, geography: &Geography) -> Vec<String> {
    let mut factors = vec![match level {
        CrimeLevel::High | CrimeLevel::VeryHigh => "Above average crime rates in area",
        CrimeLevel::Moderate => "Moderate crime activity",
        CrimeLevel::Low | CrimeLevel::VeryLow => "Below average crime rates",
    }
    .to_string()];

    if let Some(area) = geography.high_crime_area {
        factors.push(format!("Located in a high-crime area ({area})"));
    }
    if let Some(area) = geography.low_crime_area {
        factors.push(format!("Located in a low-crime area ({area})"));
    }
    match &geography.zip {
        Some((zip, risk)) if *risk > 0 => factors.push(format!("ZIP code {zip} has elevated crime")),
        Some((zip, risk)) if *risk < 0 => factors.push(format!("ZIP code {zip} has low crime")),
        _ => {}
    }

    let price = price_term(listing.price);
    if price >= 20 {
        factors.push("Property value below neighborhood median".to_string());
    } else if price < 0 {
        factors.push("Property value above neighborhood median".to_string());
    }
    if age_term(listing.year_built) >= 10 {
        factors.push(format!("Older construction (built {})", listing.year_built));
    }
    if size_term(listing.square_footage) > 0 {
        factors.push("Small unit size".to_string());
    }
    if bedroom_term(listing.bedrooms) < 0 {
        factors.push("Family-sized home".to_string());
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::address_hash;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn listing(address: &'static str) -> Listing<'static> {
        Listing {
            address,
            hash: address_hash(address),
            price: 500_000,
            bedrooms: 3,
            bathrooms: 2.0,
            square_footage: 2000,
            year_built: 2000,
        }
    }

    #[test]
    fn keyword_lists_apply_once_each() {
        let geo = geography("1 Rodeo Dr, Beverly Hills", 5);
        assert_eq!(geo.low_crime_area, Some("beverly hills"));
        assert_eq!(geo.high_crime_area, None);
        assert_eq!(geo.term, -25);

        let geo = geography("77 Grand Concourse, Bronx", 5);
        assert_eq!(geo.high_crime_area, Some("bronx"));
        assert_eq!(geo.term, 30);
    }

    #[test]
    fn la_matches_anywhere_in_the_address() {
        assert_eq!(geography("10 Lake Ln, Dallas", 5).term, 3);
        assert_eq!(geography("10 Plaza Way", 5).term, 3);
        assert_eq!(geography("10 Main St, LA", 5).term, 3);
        assert_eq!(geography("10 Oak St, Boston", 5).term, 0);
        assert_eq!(geography("10 Main St, Los Angeles", 5).term, 3);
    }

    #[test]
    fn zip_table_lookup() {
        assert_eq!(zip_risk("90221"), 25);
        assert_eq!(zip_risk("10460"), 20);
        assert_eq!(zip_risk("90211"), -20);
        assert_eq!(zip_risk("60601"), 0);

        let geo = geography("500 Elm St, 90222", 5);
        assert_eq!(geo.zip, Some(("90222".to_string(), 25)));
        assert_eq!(geo.term, 25);
    }

    #[test]
    fn regional_bias_is_bounded() {
        for hash in [0, 1, 5, 10, 11, 12345, u32::MAX] {
            let term = geography("1 Oak St", hash).term;
            assert!((-5..=5).contains(&term), "hash {hash} gave {term}");
        }
    }

    #[test]
    fn bands() {
        assert_eq!(price_term(99_999), 50);
        assert_eq!(price_term(100_000), 40);
        assert_eq!(price_term(599_999), 5);
        assert_eq!(price_term(1_200_000), -25);
        assert_eq!(age_term(1949), 15);
        assert_eq!(age_term(2020), 0);
        assert_eq!(age_term(2021), -10);
        assert_eq!(size_term(800), 5);
        assert_eq!(size_term(4000), 0);
        assert_eq!(bedroom_term(1), 8);
        assert_eq!(bedroom_term(5), -5);
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(level(9), CrimeLevel::VeryLow);
        assert_eq!(level(10), CrimeLevel::Low);
        assert_eq!(level(29), CrimeLevel::Moderate);
        assert_eq!(level(30), CrimeLevel::High);
        assert_eq!(level(40), CrimeLevel::VeryHigh);
    }

    #[test]
    fn compton_lists_its_contributors() {
        let mut compton = listing("123 Main St, Compton");
        compton.price = 90_000;
        compton.bedrooms = 1;
        compton.square_footage = 700;
        compton.year_built = 1940;

        let risk = assess(&compton, &mut StdRng::seed_from_u64(0));
        assert_eq!(risk.score, 100.0);
        assert_eq!(risk.index, 50);
        assert_eq!(risk.level, CrimeLevel::VeryHigh);
        assert_eq!(risk.factors[0], "Above average crime rates in area");
        assert!(risk.factors.iter().any(|f| f.contains("compton")));
        assert!(risk.factors.iter().any(|f| f == "Small unit size"));
    }

    #[test]
    fn score_stays_in_range() {
        let mut mansion = listing("1 Beverly Hills Blvd, Beverly Hills, CA 90210");
        mansion.price = 9_000_000;
        mansion.bedrooms = 7;
        mansion.square_footage = 9000;
        mansion.year_built = 2023;

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let risk = assess(&mansion, &mut rng);
            assert_eq!(risk.score, 0.0);
            assert_eq!(risk.level, CrimeLevel::VeryLow);
        }
    }
}
