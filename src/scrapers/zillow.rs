use url::Url;

use crate::models::{PropertyRecord, Source};
use crate::scrapers::chain::{details_value, text_value, Chain};
use crate::scrapers::page::Page;
use crate::scrapers::patterns;
use crate::scrapers::traits::{host_matches, Readiness, SiteScraper, TimeoutPolicy};

const ADDRESS: &[&str] = &[
    r#"[data-testid="property-card-addr"]"#,
    ".property-card-addr",
    r#"[data-testid="home-details-summary-address"]"#,
];

const PRICE: &[&str] = &[
    r#"[data-testid="property-card-price"]"#,
    ".property-card-price",
    r#"[data-testid="home-details-summary-price"]"#,
];

const DETAILS: &[&str] = &[
    r#"[data-testid="property-card-details"]"#,
    ".property-card-details",
    r#"[data-testid="home-details-summary-details"]"#,
];

const YEAR_BUILT: &[&str] = &[r#"[data-testid="year-built"]"#, ".year-built"];

/// Zillow listing cards and home details pages.
pub struct ZillowScraper;

impl SiteScraper for ZillowScraper {
    fn source(&self) -> Source {
        Source::Zillow
    }

    fn matches(&self, url: &Url) -> bool {
        host_matches(url, "zillow.com")
    }

    fn readiness(&self) -> Option<Readiness> {
        Some(Readiness {
            selector: r#"[data-testid="property-card"]"#,
            on_timeout: TimeoutPolicy::FailFast,
        })
    }

    fn scrape(&self, page: &Page) -> PropertyRecord {
        let mut record = PropertyRecord::new(Source::Zillow, page.url());

        record.address = Chain::new("address").selectors(ADDRESS, text_value).run(page);
        record.price = Chain::new("price")
            .selectors(PRICE, patterns::extract_price)
            .run(page);

        let details = Chain::new("details")
            .selectors(DETAILS, details_value)
            .run(page)
            .unwrap_or_default();
        record.bedrooms = Chain::new("bedrooms")
            .known(details.bedrooms)
            .body_text(|text| patterns::extract_details(text).bedrooms)
            .run(page);
        record.bathrooms = Chain::new("bathrooms")
            .known(details.bathrooms)
            .body_text(|text| patterns::extract_details(text).bathrooms)
            .run(page);
        record.square_footage = Chain::new("squareFootage")
            .known(details.square_footage)
            .body_text(patterns::extract_square_footage)
            .run(page);

        record.year_built = Chain::new("yearBuilt")
            .selectors(YEAR_BUILT, patterns::extract_year)
            .body_text(patterns::extract_labelled_year)
            .run(page);

        if let Some(coordinates) = patterns::extract_coordinates(&page.scripts()) {
            record.latitude = Some(coordinates.lat);
            record.longitude = Some(coordinates.lng);
        }

        record
    }
}
