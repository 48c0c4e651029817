//! Text-level extractors shared by every site.
//!
//! Each takes a slice of page text and returns `None` when its pattern does
//! not occur. Nothing here checks plausibility.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static PRICE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$?\s*(\d[\d,]*)").unwrap());

static BEDROOMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:bd|bed|br|bedroom)").unwrap());

static BATHROOMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:bath|ba|bathroom)").unwrap());

static SQUARE_FOOTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+|\d+)\s*(?:sq\.?\s*ft|sqft|square\s*feet)").unwrap()
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static BUILT_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:built\s+in|year\s+built:?)\s*((?:19|20)\d{2})\b").unwrap()
});

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").unwrap());

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").unwrap());

static GROUPED_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d[\d,]*)").unwrap());

static LATITUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)latitude["\s:]+([-\d.]+)"#).unwrap());

static LONGITUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)longitude["\s:]+([-\d.]+)"#).unwrap());

static COORDINATE_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)coordinates["\s:]*\[["\s]*([-\d.]+)["\s]*,\s*([-\d.]+)"#).unwrap()
});

static LAT_LNG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)lat["\s:]+([-\d.]+).*?lng["\s:]+([-\d.]+)"#).unwrap());

static URL_LAT_LNG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)lat=([-\d.]+).*?lng=([-\d.]+)").unwrap());

/// Beds, baths and square footage pulled from one block of text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Details {
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub square_footage: Option<i64>,
}

impl Details {
    pub fn is_empty(&self) -> bool {
        self.bedrooms.is_none() && self.bathrooms.is_none() && self.square_footage.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// `"$1,234,567"` → `1234567`. `None` when the text has no digits.
pub fn extract_price(text: &str) -> Option<i64> {
    let caps = PRICE.captures(text)?;
    strip_separators(&caps[1]).parse().ok()
}

pub fn extract_details(text: &str) -> Details {
    Details {
        bedrooms: capture(&BEDROOMS, text).and_then(|s| s.parse().ok()),
        bathrooms: capture(&BATHROOMS, text).and_then(|s| s.parse().ok()),
        square_footage: extract_square_footage(text),
    }
}

pub fn extract_square_footage(text: &str) -> Option<i64> {
    capture(&SQUARE_FOOTAGE, text).and_then(|s| strip_separators(s).parse().ok())
}

/// First 19xx/20xx token bounded by word breaks. Future years such as 2045
/// are accepted.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Year following a "built in" / "year built" label in free text.
pub fn extract_labelled_year(text: &str) -> Option<i32> {
    capture(&BUILT_IN, text).and_then(|s| s.parse().ok())
}

/// First bare integer, e.g. `"3 Beds"` → `3`.
pub fn first_integer<T: std::str::FromStr>(text: &str) -> Option<T> {
    capture(&INTEGER, text).and_then(|s| s.parse().ok())
}

/// First integer or decimal, e.g. `"2.5 Baths"` → `2.5`.
pub fn first_decimal(text: &str) -> Option<f64> {
    capture(&DECIMAL, text).and_then(|s| s.parse().ok())
}

/// First integer that may carry thousands separators.
pub fn first_grouped_integer(text: &str) -> Option<i64> {
    capture(&GROUPED_INTEGER, text).and_then(|s| strip_separators(s).parse().ok())
}

/// Scan inline scripts for embedded map coordinates.
///
/// Per script, a `latitude`/`longitude` pair is tried first, then a
/// `coordinates: [lat, lng]` literal, then a `lat … lng` pair. The first
/// script that yields a pair wins.
pub fn extract_coordinates<S: AsRef<str>>(scripts: &[S]) -> Option<Coordinates> {
    scripts.iter().find_map(|script| {
        let content = script.as_ref();

        if let (Some(lat), Some(lng)) = (capture(&LATITUDE, content), capture(&LONGITUDE, content))
        {
            if let Some(coordinates) = parse_pair(lat, lng) {
                return Some(coordinates);
            }
        }

        if let Some(caps) = COORDINATE_ARRAY.captures(content) {
            if let Some(coordinates) = parse_pair(&caps[1], &caps[2]) {
                return Some(coordinates);
            }
        }

        LAT_LNG
            .captures(content)
            .and_then(|caps| parse_pair(&caps[1], &caps[2]))
    })
}

/// `lat=`/`lng=` query parameters anywhere in the page URL.
pub fn extract_coordinates_from_url(url: &str) -> Option<Coordinates> {
    let caps = URL_LAT_LNG.captures(url)?;
    parse_pair(&caps[1], &caps[2])
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn strip_separators(digits: &str) -> String {
    digits.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn parse_pair(lat: &str, lng: &str) -> Option<Coordinates> {
    Some(Coordinates {
        lat: lat.parse().ok()?,
        lng: lng.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_strips_currency_and_separators() {
        assert_eq!(extract_price("$1,234,567"), Some(1_234_567));
        assert_eq!(extract_price("Listed at $450,000 (reduced)"), Some(450_000));
        assert_eq!(extract_price("899000"), Some(899_000));
    }

    #[test]
    fn price_without_digits_is_none() {
        assert_eq!(extract_price("Contact for price"), None);
        assert_eq!(extract_price(""), None);
        assert_eq!(extract_price("$ —"), None);
    }

    #[test]
    fn details_from_summary_line() {
        let details = extract_details("4 beds 2.5 baths 2,350 sqft");
        assert_eq!(details.bedrooms, Some(4));
        assert_eq!(details.bathrooms, Some(2.5));
        assert_eq!(details.square_footage, Some(2350));
    }

    #[test]
    fn details_accept_abbreviations() {
        let details = extract_details("3 bd | 2 ba | 1500 sq ft");
        assert_eq!(details.bedrooms, Some(3));
        assert_eq!(details.bathrooms, Some(2.0));
        assert_eq!(details.square_footage, Some(1500));
    }

    #[test]
    fn square_feet_spelled_out() {
        assert_eq!(extract_square_footage("1,024 Square Feet"), Some(1024));
    }

    #[test]
    fn details_missing_are_none() {
        let details = extract_details("Charming bungalow near the park");
        assert!(details.is_empty());
    }

    #[test]
    fn year_accepts_19xx_and_20xx() {
        assert_eq!(extract_year("Built in 1995"), Some(1995));
        assert_eq!(extract_year("Year built: 2007"), Some(2007));
    }

    #[test]
    fn year_over_matches_future_years() {
        assert_eq!(extract_year("Unit 2045"), Some(2045));
    }

    #[test]
    fn year_rejects_other_numbers() {
        assert_eq!(extract_year("Built in 1850"), None);
        assert_eq!(extract_year("Lot 12345"), None);
        assert_eq!(extract_year("Unit 2045B"), None);
    }

    #[test]
    fn labelled_year_needs_label() {
        assert_eq!(extract_labelled_year("Copyright 2024. Built in 1962."), Some(1962));
        assert_eq!(extract_labelled_year("Copyright 2024"), None);
    }

    #[test]
    fn bare_numbers() {
        assert_eq!(first_integer::<u32>("3 Beds"), Some(3));
        assert_eq!(first_decimal("2.5 Baths"), Some(2.5));
        assert_eq!(first_grouped_integer("1,850 sqft"), Some(1850));
    }

    #[test]
    fn coordinates_from_latitude_longitude_keys() {
        let scripts = [r#"{"latitude": 40.7128, "longitude": -74.006}"#];
        let coordinates = extract_coordinates(&scripts).unwrap();
        assert_eq!(coordinates.lat, 40.7128);
        assert_eq!(coordinates.lng, -74.006);
    }

    #[test]
    fn coordinates_from_array_literal() {
        let scripts = [r#"geo = {"coordinates": [34.05, -118.24]}"#];
        let coordinates = extract_coordinates(&scripts).unwrap();
        assert_eq!(coordinates, Coordinates { lat: 34.05, lng: -118.24 });
    }

    #[test]
    fn coordinates_from_lat_lng_pair() {
        let scripts = ["window.data = {}", r#"{"lat":47.61,"zoom":3,"lng":-122.33}"#];
        let coordinates = extract_coordinates(&scripts).unwrap();
        assert_eq!(coordinates, Coordinates { lat: 47.61, lng: -122.33 });
    }

    #[test]
    fn coordinates_absent() {
        let scripts = ["console.log('hello')"];
        assert_eq!(extract_coordinates(&scripts), None);
    }

    #[test]
    fn coordinates_from_url_query() {
        let url = "https://www.redfin.com/home/123?lat=37.77&zoom=12&lng=-122.41";
        let coordinates = extract_coordinates_from_url(url).unwrap();
        assert_eq!(coordinates, Coordinates { lat: 37.77, lng: -122.41 });
        assert_eq!(extract_coordinates_from_url("https://www.redfin.com/home/123"), None);
    }
}
