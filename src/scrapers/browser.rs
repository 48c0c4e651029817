use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{info, warn};

use crate::scrapers::source::PageSource;

const OUTER_HTML: &str = "document.documentElement.outerHTML";

const DISMISS_CONSENT: &str = r#"
    const button = document.querySelector('button[id*="accept"], button[id*="consent"], button[aria-label*="Accept"]');
    if (button) button.click();
"#;

/// Live listing tab in headless Chrome.
///
/// Every snapshot re-serializes the DOM, so client-side rendering shows up
/// between polls.
pub struct BrowserPage {
    // Keeps the Chrome process alive for the lifetime of the tab.
    _browser: Browser,
    tab: Arc<Tab>,
    url: String,
}

impl BrowserPage {
    /// Launch headless Chrome and navigate to `url`.
    pub async fn open(url: &str) -> Result<Self> {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || Self::open_blocking(url))
            .await
            .context("Browser launch task panicked")?
    }

    fn open_blocking(url: String) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab()?;

        info!("Opening {}", url);
        tab.navigate_to(&url)?;
        tab.wait_until_navigated()?;

        if let Err(e) = tab.evaluate(DISMISS_CONSENT, false) {
            warn!("Could not dismiss consent banner: {}", e);
        }

        Ok(Self {
            _browser: browser,
            tab,
            url,
        })
    }

    /// Save the current HTML and a screenshot under `dir` for selector debugging.
    pub async fn save_debug_artifacts(&self, dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dir).await?;

        let html = self.snapshot().await?;
        let html_path = dir.join("page.html");
        tokio::fs::write(&html_path, &html).await?;
        info!("Saved page HTML to {} ({} bytes)", html_path.display(), html.len());

        let tab = Arc::clone(&self.tab);
        let screenshot = tokio::task::spawn_blocking(move || {
            tab.capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
        })
        .await
        .context("Screenshot task panicked")??;
        let screenshot_path = dir.join("screenshot.png");
        tokio::fs::write(&screenshot_path, screenshot).await?;
        info!("Saved screenshot to {}", screenshot_path.display());

        Ok(())
    }
}

#[async_trait]
impl PageSource for BrowserPage {
    fn url(&self) -> &str {
        &self.url
    }

    async fn snapshot(&self) -> Result<String> {
        let tab = Arc::clone(&self.tab);
        let result = tokio::task::spawn_blocking(move || tab.evaluate(OUTER_HTML, false))
            .await
            .context("Snapshot task panicked")??;

        match result.value {
            Some(value) => Ok(value.as_str().unwrap_or_default().to_string()),
            None => {
                warn!("Could not get HTML from page");
                Ok(String::new())
            }
        }
    }
}
