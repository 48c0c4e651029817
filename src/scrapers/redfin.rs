use url::Url;

use crate::models::{PropertyRecord, Source};
use crate::scrapers::chain::{details_value, text_value, Chain};
use crate::scrapers::page::Page;
use crate::scrapers::patterns;
use crate::scrapers::traits::{host_matches, Readiness, SiteScraper, TimeoutPolicy};

// Newest markup first; older class names stay as fallbacks.
const ADDRESS: &[&str] = &[
    ".homeAddress",
    r#"[data-rf-test-name="address"]"#,
    ".homeAddressValue",
    ".homeAddressContainer .homeAddress",
    "h1.homeAddress",
];

const PRICE: &[&str] = &[
    ".homeValue",
    r#"[data-rf-test-name="price"]"#,
    ".homeValueValue",
    ".priceValue",
    ".homePrice",
    ".homeValueContainer .homeValue",
];

const DETAILS: &[&str] = &[
    ".HomeStats",
    r#"[data-rf-test-name="property-details"]"#,
    ".homeStats",
    ".propertyStats",
    ".homeDetails",
    ".homeStatsContainer",
];

const YEAR_BUILT: &[&str] = &[
    ".yearBuilt",
    r#"[data-rf-test-name="year-built"]"#,
    ".homeYearBuilt",
    ".yearBuiltValue",
];

/// Redfin home pages.
///
/// Redfin's stats block moves around a lot, so beds and baths fall back to
/// a scan of the whole page text.
pub struct RedfinScraper;

impl SiteScraper for RedfinScraper {
    fn source(&self) -> Source {
        Source::Redfin
    }

    fn matches(&self, url: &Url) -> bool {
        host_matches(url, "redfin.com")
    }

    fn readiness(&self) -> Option<Readiness> {
        Some(Readiness {
            selector: r#".homeAddress, .homeValue, [data-rf-test-name="address"]"#,
            on_timeout: TimeoutPolicy::Proceed,
        })
    }

    fn scrape(&self, page: &Page) -> PropertyRecord {
        let mut record = PropertyRecord::new(Source::Redfin, page.url());

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

        let coordinates = patterns::extract_coordinates(&page.scripts())
            .or_else(|| patterns::extract_coordinates_from_url(page.url()));
        if let Some(coordinates) = coordinates {
            record.latitude = Some(coordinates.lat);
            record.longitude = Some(coordinates.lng);
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrapes_home_stats() {
        let html = r#"<html><body>
            <h1 class="homeAddress">742 Evergreen Terrace, Springfield</h1>
            <div class="homeValue"><span>$</span><span>615,000</span></div>
            <div class="HomeStats">
              <div>4 beds</div><div>2.5 baths</div><div>2,200 sq ft</div>
            </div>
            <div class="yearBuilt">Year built 1989</div>
            <script>{"lat":44.05,"zoom":12,"lng":-123.09}</script>
        </body></html>"#;
        let page = Page::parse("https://www.redfin.com/OR/Springfield/home/1", html);
        let record = RedfinScraper.scrape(&page);

        assert_eq!(record.address.as_deref(), Some("742 Evergreen Terrace, Springfield"));
        assert_eq!(record.price, Some(615_000));
        assert_eq!(record.bedrooms, Some(4));
        assert_eq!(record.bathrooms, Some(2.5));
        assert_eq!(record.square_footage, Some(2200));
        assert_eq!(record.year_built, Some(1989));
        assert_eq!(record.latitude, Some(44.05));
        assert_eq!(record.longitude, Some(-123.09));
    }

    #[test]
    fn body_text_covers_missing_stats() {
        let html = r#"<html><body>
            <div data-rf-test-name="address">55 Pine St</div>
            <p>This 2 bedroom, 1 bath cottage sits on a quiet street.</p>
        </body></html>"#;
        let page = Page::parse("https://www.redfin.com/home/2?lat=37.5&lng=-122.2", html);
        let record = RedfinScraper.scrape(&page);

        assert_eq!(record.address.as_deref(), Some("55 Pine St"));
        assert_eq!(record.price, None);
        assert_eq!(record.bedrooms, Some(2));
        assert_eq!(record.bathrooms, Some(1.0));
        assert_eq!(record.latitude, Some(37.5));
        assert_eq!(record.longitude, Some(-122.2));
    }

    #[test]
    fn empty_page_gives_empty_record() {
        let page = Page::parse("https://www.redfin.com/home/3", "<html><body></body></html>");
        let record = RedfinScraper.scrape(&page);
        assert_eq!(record.source, Source::Redfin);
        assert_eq!(record.missing_fields().len(), 7);
    }
}
