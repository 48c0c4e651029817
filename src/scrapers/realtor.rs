use url::Url;

use crate::models::{PropertyRecord, Source};
use crate::scrapers::chain::{details_value, text_value, Chain};
use crate::scrapers::page::Page;
use crate::scrapers::patterns;
use crate::scrapers::traits::{host_matches, Readiness, SiteScraper, TimeoutPolicy};

const ADDRESS: &[&str] = &[
    r#"[data-testid="address"]"#,
    ".address",
    ".property-address",
    ".home-address",
    r#"h1[data-testid="address"]"#,
    ".address-value",
    ".property-title h1",
    ".home-title",
];

const PRICE: &[&str] = &[
    r#"[data-testid="price"]"#,
    ".price",
    ".price-value",
    ".property-price",
    ".home-price",
    ".price-container .price",
    ".price-display",
];

const DETAILS: &[&str] = &[
    r#"[data-testid="property-details"]"#,
    ".property-details",
    ".home-details",
    ".property-stats",
    ".home-stats",
    ".property-info",
    ".home-info",
];

const BEDS: &[&str] = &[
    r#"[data-testid="beds"]"#,
    ".beds",
    ".bedrooms",
    ".property-beds",
    ".home-beds",
];

const BATHS: &[&str] = &[
    r#"[data-testid="baths"]"#,
    ".baths",
    ".bathrooms",
    ".property-baths",
    ".home-baths",
];

const SQFT: &[&str] = &[
    r#"[data-testid="sqft"]"#,
    ".sqft",
    ".square-feet",
    ".property-sqft",
    ".home-sqft",
    ".size",
];

const YEAR_BUILT: &[&str] = &[
    r#"[data-testid="year-built"]"#,
    ".year-built",
    ".built",
    ".property-year",
    ".home-year",
    ".construction-year",
];

/// Realtor.com detail pages.
pub struct RealtorScraper;

impl SiteScraper for RealtorScraper {
    fn source(&self) -> Source {
        Source::Realtor
    }

    fn matches(&self, url: &Url) -> bool {
        host_matches(url, "realtor.com")
    }

    fn readiness(&self) -> Option<Readiness> {
        Some(Readiness {
            selector: r#".price, .price-value, [data-testid="price"], .property-price"#,
            on_timeout: TimeoutPolicy::Proceed,
        })
    }

    fn scrape(&self, page: &Page) -> PropertyRecord {
        let mut record = PropertyRecord::new(Source::Realtor, page.url());

        record.address = Chain::new("address").selectors(ADDRESS, text_value).run(page);
        record.price = Chain::new("price")
            .selectors(PRICE, patterns::extract_price)
            .run(page);

        // Summary block first, then the per-attribute badges, then the page text.
        let details = Chain::new("details")
            .selectors(DETAILS, details_value)
            .run(page)
            .unwrap_or_default();
        record.bedrooms = Chain::new("bedrooms")
            .known(details.bedrooms)
            .selectors(BEDS, patterns::first_integer::<u32>)
            .body_text(|text| patterns::extract_details(text).bedrooms)
            .run(page);
        record.bathrooms = Chain::new("bathrooms")
            .known(details.bathrooms)
            .selectors(BATHS, patterns::first_decimal)
            .body_text(|text| patterns::extract_details(text).bathrooms)
            .run(page);
        record.square_footage = Chain::new("squareFootage")
            .known(details.square_footage)
            .selectors(SQFT, patterns::first_grouped_integer)
            .body_text(patterns::extract_square_footage)
            .run(page);

        record.year_built = Chain::new("yearBuilt")
            .selectors(YEAR_BUILT, patterns::extract_year)
            .body_text(patterns::extract_labelled_year)
            .run(page);

        let coordinates = patterns::extract_coordinates(&page.scripts())
            .or_else(|| patterns::extract_coordinates_from_url(page.url()));
        if let Some(coordinates) = coordinates {
            record.latitude = Some(coordinates.lat);
            record.longitude = Some(coordinates.lng);
        }

        record
    }
}
