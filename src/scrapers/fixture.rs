use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::models::{PropertyRecord, Source};
use crate::scrapers::page::Page;
use crate::scrapers::patterns;
use crate::scrapers::traits::{Readiness, SiteScraper};

/// Script element holding a ready-made record.
pub const EMBEDDED_DATA: &str = "script#propertyData";

static ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Address:\s*(.+?)(?:\n|$)").unwrap());
static BEDROOMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Bedrooms:\s*(\d+)").unwrap());
static BATHROOMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bathrooms:\s*(\d+(?:\.\d+)?)").unwrap());
static SQUARE_FOOTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Square Footage:\s*([\d,]+)").unwrap());
static YEAR_BUILT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Year Built:\s*(\d+)").unwrap());

/// Fields a fixture may embed; everything else comes from the page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddedRecord {
    address: Option<String>,
    price: Option<i64>,
    bedrooms: Option<u32>,
    bathrooms: Option<f64>,
    square_footage: Option<i64>,
    year_built: Option<i32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Local test pages: a `test.html` file with a labelled `.details` block,
/// or any page that embeds its record as JSON.
pub struct FixtureScraper;

impl FixtureScraper {
    /// Whether `page` carries an embedded record.
    pub fn has_embedded_data(page: &Page) -> bool {
        page.contains(EMBEDDED_DATA)
    }

    fn embedded(page: &Page) -> Option<EmbeddedRecord> {
        let json = page.texts(EMBEDDED_DATA).into_iter().next()?;
        match serde_json::from_str(&json) {
            Ok(embedded) => Some(embedded),
            Err(e) => {
                warn!("Ignoring malformed embedded property data: {}", e);
                None
            }
        }
    }

    fn labelled(page: &Page) -> EmbeddedRecord {
        let mut embedded = EmbeddedRecord {
            price: page.text(".price").and_then(|text| patterns::extract_price(&text)),
            ..Default::default()
        };

        // Raw text keeps the line breaks the address pattern stops at.
        if let Some(details) = page.texts(".details").into_iter().next() {
            embedded.address = capture(&ADDRESS, &details).map(|s| s.trim().to_string());
            embedded.bedrooms = capture(&BEDROOMS, &details).and_then(|s| s.parse().ok());
            embedded.bathrooms = capture(&BATHROOMS, &details).and_then(|s| s.parse().ok());
            embedded.square_footage = capture(&SQUARE_FOOTAGE, &details)
                .and_then(|s| s.replace(',', "").parse().ok());
            embedded.year_built = capture(&YEAR_BUILT, &details).and_then(|s| s.parse().ok());
        }

        embedded
    }
}

impl SiteScraper for FixtureScraper {
    fn source(&self) -> Source {
        Source::TestFixture
    }

    fn matches(&self, url: &Url) -> bool {
        url.path().ends_with("test.html")
    }

    fn readiness(&self) -> Option<Readiness> {
        None
    }

    fn scrape(&self, page: &Page) -> PropertyRecord {
        let embedded = match Self::embedded(page) {
            Some(embedded) => {
                debug!("Using embedded property data");
                embedded
            }
            None => Self::labelled(page),
        };

        PropertyRecord {
            address: embedded.address,
            price: embedded.price,
            bedrooms: embedded.bedrooms,
            bathrooms: embedded.bathrooms,
            square_footage: embedded.square_footage,
            year_built: embedded.year_built,
            latitude: embedded.latitude,
            longitude: embedded.longitude,
            ..PropertyRecord::new(Source::TestFixture, page.url())
        }
    }
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
