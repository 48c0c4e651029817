//! Plain-text rendering of the panel for terminals.

use std::fmt::Write;

use crate::analysis::market;
use crate::models::{AnalysisResult, PropertyRecord};
use crate::panel::{PanelMode, PanelState, Section};
use crate::render::charts::Charts;
use crate::render::format::{currency, price_vs_median, signed_percent};
use crate::render::slots::{self, Slot};

/// Slot ids shown under each section heading.
fn section_slots(section: Section) -> &'static [&'static str] {
    match section {
        Section::PriceAnalysis => &[
            "median-price",
            "price-per-sqft",
            "median-price-per-sqft",
            "market-position",
            "price-percentile",
        ],
        Section::MedianIncome => &["median-income", "rent-affordability", "neighborhood-stability"],
        Section::CrimeRisk => &["crime-risk-score", "crime-risk-level", "crime-risk-factors"],
        Section::MarketRisk => &["vacancy-rate", "population-growth", "job-growth", "overall-market-risk"],
        Section::RentViability => &[
            "nearby-institutions",
            "rent-boost",
            "vacancy-reduction",
            "rent-viability-status",
        ],
        Section::Demographics => &[],
    }
}

fn label(id: &str) -> String {
    let mut words: Vec<String> = id
        .split('-')
        .map(|word| match word {
            "sqft" => "sq ft".to_string(),
            _ => word.to_string(),
        })
        .collect();
    if let Some(first) = words.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().chain(chars).collect();
        }
    }
    words.join(" ")
}

pub fn text_report(
    record: &PropertyRecord,
    analysis: &AnalysisResult,
    charts: &Charts,
    state: &PanelState,
) -> String {
    let slots = slots::slots(record, analysis);
    let find = |id: &str| slots.iter().find(|slot: &&Slot| slot.id == id);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} [{}]",
        record.address.as_deref().unwrap_or("Address unavailable"),
        record.source
    );
    if let Some(price) = record.price {
        let delta = price_vs_median(price, analysis.price_analysis.median);
        let _ = writeln!(
            out,
            "Listed at {} ({} vs area median)",
            currency(price),
            signed_percent(delta)
        );
    }

    if state.mode == PanelMode::Minimized {
        let _ = writeln!(
            out,
            "Crime risk {} | Market risk {}",
            analysis.crime_risk.level, analysis.market_risk.overall_risk
        );
        return out;
    }

    for section in Section::ALL {
        let marker = if state.is_open(section) { "▲" } else { "▼" };
        let _ = writeln!(out, "\n{marker} {}", section.title());
        if !state.is_open(section) {
            continue;
        }

        for slot in section_slots(section).iter().filter_map(|&id| find(id)) {
            let _ = writeln!(out, "  {:<24} {}", label(slot.id), slot.content.plain());
        }
        match section {
            Section::PriceAnalysis => indent(&mut out, &charts.price_comparison),
            Section::MarketRisk => {
                for flag in market::flags(&analysis.market_risk) {
                    let _ = writeln!(out, "  ! {flag}");
                }
            }
            Section::Demographics => indent(&mut out, &charts.demographics),
            _ => {}
        }
    }
    out
}

fn indent(out: &mut String, block: &str) {
    for line in block.lines() {
        let _ = writeln!(out, "  {line}");
    }
}
