use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::error::{Result, ScoutError};
use crate::scrapers::page::Page;
use crate::scrapers::source::PageSource;

/// Poll `source` until `selector` matches or `deadline` passes.
///
/// Returns the snapshot in which the element appeared. The wait is
/// abandoned by dropping the future; on timeout the caller decides whether
/// to proceed with a fresh snapshot.
pub async fn wait_for_element<S>(
    source: &S,
    selector: &str,
    poll_interval: Duration,
    deadline: Instant,
) -> Result<String>
where
    S: PageSource + ?Sized,
{
    let started = Instant::now();
    let mut polls = 0u32;

    loop {
        let html = source.snapshot().await?;
        polls += 1;
        if snapshot_contains(source.url(), &html, selector) {
            debug!("Found {} after {} polls", selector, polls);
            return Ok(html);
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(ScoutError::ElementTimeout {
                selector: selector.to_string(),
                waited: now - started,
            });
        }
        tokio::time::sleep(poll_interval.min(deadline - now)).await;
    }
}

fn snapshot_contains(url: &str, html: &str, selector: &str) -> bool {
    Page::parse(url, html).contains(selector)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves a fixed sequence of snapshots, repeating the last one.
    pub(crate) struct RenderingPage {
        url: String,
        snapshots: Mutex<Vec<String>>,
    }

    impl RenderingPage {
        pub(crate) fn new(url: &str, snapshots: &[&str]) -> Self {
            let mut snapshots: Vec<String> = snapshots.iter().map(|s| s.to_string()).collect();
            snapshots.reverse();
            Self {
                url: url.to_string(),
                snapshots: Mutex::new(snapshots),
            }
        }
    }

    #[async_trait]
    impl PageSource for RenderingPage {
        fn url(&self) -> &str {
            &self.url
        }

        async fn snapshot(&self) -> anyhow::Result<String> {
            let mut snapshots = self.snapshots.lock().unwrap();
            if snapshots.len() > 1 {
                Ok(snapshots.pop().unwrap())
            } else {
                Ok(snapshots.last().cloned().unwrap_or_default())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_once_element_renders() {
        let page = RenderingPage::new(
            "https://www.redfin.com/x",
            &["<body></body>", "<body></body>", "<body><h1 class=\"homeAddress\">1 Elm</h1></body>"],
        );
        let deadline = Instant::now() + Duration::from_secs(5);

        let html = wait_for_element(&page, ".homeAddress", Duration::from_millis(100), deadline)
            .await
            .unwrap();
        assert!(html.contains("1 Elm"));
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_at_deadline() {
        let page = RenderingPage::new("https://www.redfin.com/x", &["<body></body>"]);
        let deadline = Instant::now() + Duration::from_millis(500);

        let err = wait_for_element(&page, ".homeAddress", Duration::from_millis(100), deadline)
            .await
            .unwrap_err();
        match err {
            ScoutError::ElementTimeout { selector, waited } => {
                assert_eq!(selector, ".homeAddress");
                assert!(waited >= Duration::from_millis(500));
                assert!(waited < Duration::from_millis(700));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
