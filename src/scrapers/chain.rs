use tracing::debug;

use crate::error::ScoutError;
use crate::scrapers::page::Page;
use crate::scrapers::patterns::{self, Details};

/// One way of finding a field on a page.
pub type Strategy<'a, T> = Box<dyn Fn(&Page) -> Option<T> + 'a>;

/// Ordered strategies for a single field; the first `Some` wins.
pub struct Chain<'a, T> {
    field: &'static str,
    strategies: Vec<Strategy<'a, T>>,
}

impl<'a, T: 'a> Chain<'a, T> {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            strategies: Vec::new(),
        }
    }

    pub fn then(mut self, strategy: impl Fn(&Page) -> Option<T> + 'a) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Try each selector in order, parsing the element text with `parse`.
    /// A selector whose text does not parse falls through to the next one.
    pub fn selectors<F>(mut self, selectors: &'a [&'a str], parse: F) -> Self
    where
        F: Fn(&str) -> Option<T> + Copy + 'a,
    {
        for selector in selectors {
            self = self.then(move |page| page.text(selector).and_then(|text| parse(&text)));
        }
        self
    }

    /// A value already found by an earlier pass.
    pub fn known(self, value: Option<T>) -> Self
    where
        T: Clone,
    {
        self.then(move |_| value.clone())
    }

    /// Regex scan over the page's visible text.
    pub fn body_text<F>(self, parse: F) -> Self
    where
        F: Fn(&str) -> Option<T> + 'a,
    {
        self.then(move |page| parse(page.visible_text()))
    }

    pub fn run(&self, page: &Page) -> Option<T> {
        for (position, strategy) in self.strategies.iter().enumerate() {
            if let Some(value) = strategy(page) {
                debug!(field = self.field, position, "Field matched");
                return Some(value);
            }
        }
        debug!("{}", ScoutError::FieldNotFound(self.field));
        None
    }
}

/// Element text as-is.
pub fn text_value(text: &str) -> Option<String> {
    Some(text.to_string())
}

/// Details block that yielded at least one of beds, baths or sqft.
pub fn details_value(text: &str) -> Option<Details> {
    let details = patterns::extract_details(text);
    (!details.is_empty()).then_some(details)
}
