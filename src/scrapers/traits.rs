use crate::models::{PropertyRecord, Source};
use crate::scrapers::page::Page;
use url::Url;

/// What to do when a site's readiness element never shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Abort the scrape with the timeout error.
    FailFast,
    /// Settle briefly, then extract from whatever has rendered.
    Proceed,
}

/// Element whose presence means the listing has rendered.
#[derive(Debug, Clone, Copy)]
pub struct Readiness {
    pub selector: &'static str,
    pub on_timeout: TimeoutPolicy,
}

/// Common trait for all listing sites.
/// Adding a site means one more implementation registered with the extractor.
pub trait SiteScraper: Send + Sync {
    fn source(&self) -> Source;

    /// Whether this site handles `url`.
    fn matches(&self, url: &Url) -> bool;

    /// `None` means the page is read immediately.
    fn readiness(&self) -> Option<Readiness>;

    /// Run the five extraction steps against a rendered page.
    fn scrape(&self, page: &Page) -> PropertyRecord;
}

/// `true` for `domain` itself and any of its subdomains.
pub fn host_matches(url: &Url, domain: &str) -> bool {
    url.host_str().is_some_and(|host| {
        host == domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
