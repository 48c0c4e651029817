use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the scout pipeline.
///
/// Only [`ScoutError::UnsupportedSite`], a fail-fast [`ScoutError::ElementTimeout`]
/// and [`ScoutError::NoPropertyData`] end an invocation. The rest are reported
/// and degraded around.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// The page is not a known listing site.
    #[error("Unsupported website: {0}")]
    UnsupportedSite(String),

    /// An expected element never appeared within the wait budget.
    #[error("Element {selector} not found within {}ms", .waited.as_millis())]
    ElementTimeout { selector: String, waited: Duration },

    /// A single attribute could not be located by any strategy.
    #[error("Field not found: {0}")]
    FieldNotFound(&'static str),

    /// The chart backend never became ready.
    #[error("Chart library not available after {}ms", .0.as_millis())]
    ChartLibraryUnavailable(Duration),

    /// The request/response round trip failed.
    #[error("Messaging failure: {0}")]
    Messaging(String),

    /// Neither a live scrape nor the cache produced a record.
    #[error("Could not load property data. Please refresh the page and try again.")]
    NoPropertyData,

    /// The page source itself failed (navigation, fetch, evaluation).
    #[error("Page error: {0}")]
    Page(#[from] anyhow::Error),

    #[error("Invalid page URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T, E = ScoutError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_timeout_mentions_selector_and_budget() {
        let err = ScoutError::ElementTimeout {
            selector: ".homeAddress".to_string(),
            waited: Duration::from_millis(5000),
        };
        let display = err.to_string();
        assert!(display.contains(".homeAddress"));
        assert!(display.contains("5000ms"));
    }

    #[test]
    fn unsupported_site_names_url() {
        let err = ScoutError::UnsupportedSite("https://example.com/".to_string());
        assert!(err.to_string().contains("example.com"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ScoutError::from(io_err);
        assert!(matches!(err, ScoutError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
