pub mod browser;
pub mod chain;
pub mod fixture;
pub mod page;
pub mod patterns;
pub mod realtor;
pub mod redfin;
pub mod source;
pub mod traits;
pub mod wait;
pub mod zillow;

pub use browser::BrowserPage;
pub use fixture::FixtureScraper;
pub use page::Page;
pub use realtor::RealtorScraper;
pub use redfin::RedfinScraper;
pub use source::{PageSource, StaticPage};
pub use traits::{Readiness, SiteScraper, TimeoutPolicy};
pub use zillow::ZillowScraper;

use tokio::time::Instant;
use tracing::{info, warn};
use url::Url;

use crate::config::WaitConfig;
use crate::error::{Result, ScoutError};
use crate::models::{PropertyRecord, Source};

/// Turns a listing page into a [`PropertyRecord`].
pub struct Extractor {
    sites: Vec<Box<dyn SiteScraper>>,
    wait: WaitConfig,
}

impl Extractor {
    /// Extractor for every supported site.
    pub fn new(wait: WaitConfig) -> Self {
        Self {
            sites: vec![
                Box::new(ZillowScraper),
                Box::new(RedfinScraper),
                Box::new(RealtorScraper),
                Box::new(FixtureScraper),
            ],
            wait,
        }
    }

    /// Site registered for `url`, judged by the URL alone.
    pub fn site_for(&self, url: &Url) -> Option<&dyn SiteScraper> {
        self.sites
            .iter()
            .find(|site| site.matches(url))
            .map(|site| site.as_ref())
    }

    fn fixture(&self) -> Option<&dyn SiteScraper> {
        self.sites
            .iter()
            .find(|site| site.source() == Source::TestFixture)
            .map(|site| site.as_ref())
    }

    /// Detect the site, wait for it to render, and scrape it.
    ///
    /// Missing fields are left as `None`. Only an unknown site, a failing
    /// page source, or a fail-fast readiness timeout produce an error.
    pub async fn extract(&self, source: &dyn PageSource) -> Result<PropertyRecord> {
        let url = Url::parse(source.url())?;

        let (site, html) = match self.site_for(&url) {
            Some(site) => (site, None),
            None => {
                // Pages on any host may still carry an embedded record.
                let html = source.snapshot().await?;
                match self.fixture() {
                    Some(site) if embeds_record(source.url(), &html) => (site, Some(html)),
                    _ => return Err(ScoutError::UnsupportedSite(source.url().to_string())),
                }
            }
        };
        info!("Detected {} page", site.source());

        let html = match (html, site.readiness()) {
            (Some(html), _) => html,
            (None, None) => source.snapshot().await?,
            (None, Some(readiness)) => self.wait_until_ready(source, readiness).await?,
        };

        let record = scrape_snapshot(site, source.url(), &html);
        let missing = record.missing_fields();
        if missing.is_empty() {
            info!("Extracted all fields from {}", record.url);
        } else {
            info!("Extracted {} page, missing: {}", record.source, missing.join(", "));
        }
        Ok(record)
    }

    async fn wait_until_ready(&self, source: &dyn PageSource, readiness: Readiness) -> Result<String> {
        let deadline = Instant::now() + self.wait.timeout();
        let result = wait::wait_for_element(
            source,
            readiness.selector,
            self.wait.poll_interval(),
            deadline,
        )
        .await;

        match result {
            Ok(html) => Ok(html),
            Err(err @ ScoutError::ElementTimeout { .. }) => match readiness.on_timeout {
                TimeoutPolicy::FailFast => Err(err),
                TimeoutPolicy::Proceed => {
                    warn!("{}, extracting what has rendered", err);
                    tokio::time::sleep(self.wait.settle()).await;
                    Ok(source.snapshot().await?)
                }
            },
            Err(err) => Err(err),
        }
    }
}

fn embeds_record(url: &str, html: &str) -> bool {
    FixtureScraper::has_embedded_data(&Page::parse(url, html))
}

fn scrape_snapshot(site: &dyn SiteScraper, url: &str, html: &str) -> PropertyRecord {
    let page = Page::parse(url, html);
    site.scrape(&page)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::scrapers::wait::tests::RenderingPage;

    fn extractor() -> Extractor {
        Extractor::new(WaitConfig::default())
    }

    #[test]
    fn detects_sites_from_host() {
        let extractor = extractor();
        let source = |url: &str| {
            extractor
                .site_for(&Url::parse(url).unwrap())
                .map(|site| site.source())
        };
        assert_eq!(source("https://www.zillow.com/homedetails/1"), Some(Source::Zillow));
        assert_eq!(source("https://www.redfin.com/CA/home/2"), Some(Source::Redfin));
        assert_eq!(source("https://www.realtor.com/x"), Some(Source::Realtor));
        assert_eq!(source("file:///srv/test.html"), Some(Source::TestFixture));
        assert_eq!(source("https://www.example.com/"), None);
    }

    #[tokio::test]
    async fn unknown_site_is_rejected() {
        let page = StaticPage::new("https://www.example.com/listing", "<body>3 beds</body>");
        let err = extractor().extract(&page).await.unwrap_err();
        assert!(matches!(err, ScoutError::UnsupportedSite(url) if url.contains("example.com")));
    }

    #[tokio::test]
    async fn invalid_url_is_an_error() {
        let page = StaticPage::new("not a url", "<body></body>");
        let err = extractor().extract(&page).await.unwrap_err();
        assert!(matches!(err, ScoutError::Url(_)));
    }

    #[tokio::test]
    async fn embedded_record_on_any_host() {
        let html = r#"<body><script id="propertyData" type="application/json">
            {"address": "4 Privet Dr", "price": 275000}</script></body>"#;
        let page = StaticPage::new("http://localhost:8080/preview", html);
        let record = extractor().extract(&page).await.unwrap();
        assert_eq!(record.source, Source::TestFixture);
        assert_eq!(record.price, Some(275_000));
    }

    #[tokio::test(start_paused = true)]
    async fn zillow_fails_fast_when_card_never_renders() {
        let page = RenderingPage::new("https://www.zillow.com/homedetails/1", &["<body></body>"]);
        let err = extractor().extract(&page).await.unwrap_err();
        match err {
            ScoutError::ElementTimeout { selector, .. } => {
                assert_eq!(selector, r#"[data-testid="property-card"]"#)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn redfin_proceeds_after_timeout() {
        let page = RenderingPage::new(
            "https://www.redfin.com/home/1",
            &["<body><p>Cozy 2 bed 1 bath bungalow</p></body>"],
        );
        let started = Instant::now();
        let record = extractor().extract(&page).await.unwrap();

        assert_eq!(record.source, Source::Redfin);
        assert_eq!(record.bedrooms, Some(2));
        assert_eq!(record.bathrooms, Some(1.0));
        assert!(started.elapsed() >= Duration::from_millis(7000));
    }

    #[tokio::test(start_paused = true)]
    async fn realtor_waits_for_price() {
        let page = RenderingPage::new(
            "https://www.realtor.com/realestateandhomes-detail/9",
            &[
                "<body><div class=\"spinner\"></div></body>",
                "<body><div class=\"spinner\"></div></body>",
                "<body><span class=\"price\">$640,000</span></body>",
            ],
        );
        let started = Instant::now();
        let record = extractor().extract(&page).await.unwrap();

        assert_eq!(record.price, Some(640_000));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
