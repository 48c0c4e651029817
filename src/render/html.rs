//! Fills the panel template.
//!
//! Placeholders look like `{{id}}` or `{{id:modifier}}`. A bare id takes a
//! slot's content; `:class` takes its badge class. Section ids accept
//! `:state` and `:arrow`, which follow the panel state.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::models::{AnalysisResult, PropertyRecord};
use crate::panel::{PanelMode, PanelState, Section};
use crate::render::charts::Charts;
use crate::render::slots::{self, Content, Slot, DEMOGRAPHICS_CHART, PRICE_CHART};

pub const PANEL_TEMPLATE: &str = include_str!("../../assets/panel.html");

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([a-z-]+)(?::([a-z]+))?\}\}").unwrap());

/// Everything one render of the panel needs.
pub struct PanelView<'a> {
    pub record: &'a PropertyRecord,
    pub analysis: &'a AnalysisResult,
    pub charts: &'a Charts,
    pub state: &'a PanelState,
}

pub fn render_panel(view: &PanelView<'_>) -> String {
    let slots: HashMap<&str, Slot> = slots::slots(view.record, view.analysis)
        .into_iter()
        .map(|slot| (slot.id, slot))
        .collect();

    let filled = PLACEHOLDER.replace_all(PANEL_TEMPLATE, |caps: &Captures<'_>| {
        let id = &caps[1];
        match caps.get(2).map(|m| m.as_str()) {
            None => content(id, view, &slots),
            Some("class") => match id {
                "status" => "success".to_string(),
                _ => slots
                    .get(id)
                    .and_then(|slot| slot.class.as_deref())
                    .map(escape)
                    .unwrap_or_default(),
            },
            Some(modifier @ ("state" | "arrow")) => match id.parse::<Section>() {
                Ok(section) => section_marker(view.state.is_open(section), modifier),
                Err(_) => unknown(&caps[0]),
            },
            Some(_) => unknown(&caps[0]),
        }
    });
    filled.into_owned()
}

fn content(id: &str, view: &PanelView<'_>, slots: &HashMap<&str, Slot>) -> String {
    match id {
        "panel-mode" => match view.state.mode {
            PanelMode::Expanded => "expanded".to_string(),
            PanelMode::Minimized => "minimized".to_string(),
        },
        "status" => "✅ Analysis complete!".to_string(),
        "property-address" => escape(view.record.address.as_deref().unwrap_or("Address unavailable")),
        PRICE_CHART => format!("<pre>{}</pre>", escape(&view.charts.price_comparison)),
        DEMOGRAPHICS_CHART => format!("<pre>{}</pre>", escape(&view.charts.demographics)),
        _ => match slots.get(id) {
            Some(slot) => match &slot.content {
                Content::Text(text) => escape(text),
                Content::List(items) => items
                    .iter()
                    .map(|item| format!("<li>{}</li>", escape(item)))
                    .collect(),
            },
            None => unknown(id),
        },
    }
}

fn section_marker(open: bool, modifier: &str) -> String {
    match (modifier, open) {
        ("state", true) => "expanded",
        ("state", false) => "",
        (_, true) => "▲",
        (_, false) => "▼",
    }
    .to_string()
}

fn unknown(placeholder: &str) -> String {
    debug!("Unfilled placeholder {}", placeholder);
    String::new()
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
