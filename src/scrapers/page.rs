use std::cell::OnceCell;

use scraper::{Html, Selector};
use tracing::debug;

/// A parsed snapshot of a listing page.
///
/// Wraps [`scraper::Html`], which is not `Send`; build one right before
/// extraction and drop it before the next `.await`.
pub struct Page {
    url: String,
    document: Html,
    visible: OnceCell<String>,
}

impl Page {
    pub fn parse(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
            visible: OnceCell::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether any element matches `selector`.
    pub fn contains(&self, selector: &str) -> bool {
        match parse_selector(selector) {
            Some(selector) => self.document.select(&selector).next().is_some(),
            None => false,
        }
    }

    /// Text of the first element matching `selector`, if non-empty.
    ///
    /// Text nodes are trimmed and joined with single spaces so that
    /// `<li>3 bds</li><li>2 ba</li>` reads as `"3 bds 2 ba"`.
    pub fn text(&self, selector: &str) -> Option<String> {
        let selector = parse_selector(selector)?;
        let element = self.document.select(&selector).next()?;
        let text = element
            .text()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Raw text of every element matching `selector`, in document order.
    pub fn texts(&self, selector: &str) -> Vec<String> {
        match parse_selector(selector) {
            Some(selector) => self
                .document
                .select(&selector)
                .map(|element| element.text().collect::<String>())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Contents of every inline `<script>`.
    pub fn scripts(&self) -> Vec<String> {
        self.texts("script")
    }

    /// Text a reader would see in `<body>`: script and style contents are
    /// skipped and text nodes are joined with single spaces. Computed once.
    pub fn visible_text(&self) -> &str {
        self.visible.get_or_init(|| self.collect_visible_text())
    }

    fn collect_visible_text(&self) -> String {
        let root = match parse_selector("body") {
            Some(body) => self
                .document
                .select(&body)
                .next()
                .unwrap_or_else(|| self.document.root_element()),
            None => self.document.root_element(),
        };

        let mut parts = Vec::new();
        for node in root.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name().to_string()))
                .map(|name| matches!(name.as_str(), "script" | "style" | "noscript" | "template"))
                .unwrap_or(false);
            let text = text.trim();
            if !hidden && !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join(" ")
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!("Skipping invalid selector {:?}: {:?}", selector, e);
            None
        }
    }
}
