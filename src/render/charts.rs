//! Price comparison and demographics widgets.
//!
//! Drawing goes through a [`ChartBackend`]. When the backend does not come
//! up in time the chart slots get a short text note instead.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::analysis::price::PriceQuartiles;
use crate::config::WaitConfig;
use crate::error::{Result, ScoutError};
use crate::models::AnalysisResult;
use crate::render::format::{compact_currency, currency};

pub const PRICE_FALLBACK: &str = "Chart library not available. Price analysis data available above.";
pub const DEMOGRAPHICS_FALLBACK: &str =
    "Chart library not available. Demographics data available above.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: i64,
}

#[async_trait]
pub trait ChartBackend: Send + Sync {
    /// Whether the backend can draw yet.
    async fn is_ready(&self) -> bool;

    /// Bars plus the subject price marked against them.
    fn bar(&self, bars: &[Bar], subject: Option<Bar>) -> String;

    /// Percentages that sum to 100.
    fn donut(&self, slices: &[(&str, i32)]) -> String;
}

/// Poll `backend` until it reports ready or `timeout` passes.
pub async fn wait_for_charts<B>(backend: &B, poll_interval: Duration, timeout: Duration) -> Result<()>
where
    B: ChartBackend + ?Sized,
{
    let started = Instant::now();
    let deadline = started + timeout;

    loop {
        if backend.is_ready().await {
            debug!("Chart backend ready after {:?}", started.elapsed());
            return Ok(());
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(ScoutError::ChartLibraryUnavailable(now - started));
        }
        tokio::time::sleep(poll_interval.min(deadline - now)).await;
    }
}

/// Contents of the two chart slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charts {
    pub price_comparison: String,
    pub demographics: String,
}

impl Charts {
    pub fn fallback() -> Self {
        Self {
            price_comparison: PRICE_FALLBACK.to_string(),
            demographics: DEMOGRAPHICS_FALLBACK.to_string(),
        }
    }
}

/// Draw both widgets, or the text fallback if the backend never comes up.
pub async fn render_charts<B>(
    backend: &B,
    analysis: &AnalysisResult,
    subject_price: Option<i64>,
    wait: &WaitConfig,
) -> Charts
where
    B: ChartBackend + ?Sized,
{
    if let Err(e) = wait_for_charts(backend, wait.poll_interval(), wait.timeout()).await {
        warn!("{}", e);
        return Charts::fallback();
    }

    let bars = match PriceQuartiles::from_comps(&analysis.price_analysis.comps) {
        Some(quartiles) => vec![
            Bar { label: "Min".to_string(), value: quartiles.min },
            Bar { label: "Q1".to_string(), value: quartiles.q1 },
            Bar { label: "Median".to_string(), value: quartiles.median },
            Bar { label: "Q3".to_string(), value: quartiles.q3 },
            Bar { label: "Max".to_string(), value: quartiles.max },
        ],
        None => Vec::new(),
    };
    let subject = subject_price.map(|value| Bar {
        label: "Property Price".to_string(),
        value,
    });

    Charts {
        price_comparison: backend.bar(&bars, subject),
        demographics: backend.donut(&analysis.demographics.buckets()),
    }
}

/// Draws with block characters for terminal output.
#[derive(Debug, Clone)]
pub struct TextCharts {
    pub width: usize,
}

impl Default for TextCharts {
    fn default() -> Self {
        Self { width: 30 }
    }
}

impl TextCharts {
    fn row(&self, label: &str, filled: usize, value: &str) -> String {
        format!("{label:<15} {}{} {value}", "█".repeat(filled), " ".repeat(self.width - filled))
    }
}

#[async_trait]
impl ChartBackend for TextCharts {
    async fn is_ready(&self) -> bool {
        true
    }

    fn bar(&self, bars: &[Bar], subject: Option<Bar>) -> String {
        let all: Vec<&Bar> = bars.iter().chain(subject.as_ref()).collect();
        let max = all.iter().map(|bar| bar.value).max().unwrap_or(0).max(1);

        all.iter()
            .map(|bar| {
                let filled = (bar.value.max(0) as f64 / max as f64 * self.width as f64).round() as usize;
                let mut row = self.row(&bar.label, filled.min(self.width), &currency(bar.value));
                if bar.label == "Property Price" {
                    row.push_str(&format!(" ({})", compact_currency(bar.value)));
                }
                row
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn donut(&self, slices: &[(&str, i32)]) -> String {
        slices
            .iter()
            .map(|(label, share)| {
                let filled = (f64::from((*share).clamp(0, 100)) / 100.0 * self.width as f64).round() as usize;
                self.row(label, filled.min(self.width), &format!("{share}%"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
