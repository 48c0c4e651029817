//! Analysis panel state: minimized or expanded, plus which sections are open.
//!
//! State is kept per site origin and written back after every transition.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::store::{scoped_key, LocalStore};

pub const MINIMIZED_KEY: &str = "reSidebarMinimized";
pub const OPEN_SECTIONS_KEY: &str = "reSidebarOpenSections";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    PriceAnalysis,
    MedianIncome,
    CrimeRisk,
    MarketRisk,
    RentViability,
    Demographics,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::PriceAnalysis,
        Section::MedianIncome,
        Section::CrimeRisk,
        Section::MarketRisk,
        Section::RentViability,
        Section::Demographics,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::PriceAnalysis => "price-analysis",
            Section::MedianIncome => "median-income",
            Section::CrimeRisk => "crime-risk",
            Section::MarketRisk => "market-risk",
            Section::RentViability => "rent-viability",
            Section::Demographics => "demographics",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::PriceAnalysis => "Price Analysis",
            Section::MedianIncome => "Median Income",
            Section::CrimeRisk => "Crime Risk",
            Section::MarketRisk => "Market Risk",
            Section::RentViability => "Rent-by-Room Viability",
            Section::Demographics => "Demographics",
        }
    }

    /// Element id of the section body, e.g. `crime-risk-content`.
    pub fn content_id(self) -> String {
        format!("{}-content", self.id())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = String;

    /// Accepts the section id with or without the `-content` suffix.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let id = s.strip_suffix("-content").unwrap_or(s);
        Section::ALL
            .into_iter()
            .find(|section| section.id() == id)
            .ok_or_else(|| format!("unknown section: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelMode {
    Minimized,
    Expanded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub mode: PanelMode,
    pub expanded_sections: BTreeSet<Section>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            mode: PanelMode::Expanded,
            expanded_sections: Section::ALL.into_iter().collect(),
        }
    }
}

impl PanelState {
    pub fn expand(&mut self) {
        self.mode = PanelMode::Expanded;
    }

    pub fn minimize(&mut self) {
        self.mode = PanelMode::Minimized;
    }

    /// Flip one section; returns whether it is now open.
    pub fn toggle_section(&mut self, section: Section) -> bool {
        if self.expanded_sections.remove(&section) {
            false
        } else {
            self.expanded_sections.insert(section);
            true
        }
    }

    pub fn is_open(&self, section: Section) -> bool {
        self.expanded_sections.contains(&section)
    }

    /// Stored state for `origin`. Missing keys take the default.
    pub async fn load(store: &LocalStore, origin: &str) -> Result<Self> {
        let minimized: Option<bool> = store.get(&scoped_key(origin, MINIMIZED_KEY)).await?;
        let open: Option<Vec<String>> = store.get(&scoped_key(origin, OPEN_SECTIONS_KEY)).await?;

        let mut state = Self::default();
        if minimized == Some(true) {
            state.minimize();
        }
        if let Some(open) = open {
            state.expanded_sections = open.iter().filter_map(|id| id.parse().ok()).collect();
        }
        Ok(state)
    }

    pub async fn save(&self, store: &LocalStore, origin: &str) -> Result<()> {
        let open: Vec<String> = self
            .expanded_sections
            .iter()
            .map(|section| section.content_id())
            .collect();
        store
            .set(&scoped_key(origin, MINIMIZED_KEY), &(self.mode == PanelMode::Minimized))
            .await?;
        store.set(&scoped_key(origin, OPEN_SECTIONS_KEY), &open).await?;
        debug!(origin, mode = ?self.mode, open = open.len(), "Saved panel state");
        Ok(())
    }
}

/// Panel bound to one origin; every transition is persisted.
pub struct Panel<'a> {
    store: &'a LocalStore,
    origin: String,
    state: PanelState,
}

impl<'a> Panel<'a> {
    pub async fn open(store: &'a LocalStore, origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into();
        let state = PanelState::load(store, &origin).await?;
        Ok(Self {
            store,
            origin,
            state,
        })
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub async fn expand(&mut self) -> Result<()> {
        self.state.expand();
        self.state.save(self.store, &self.origin).await
    }

    pub async fn minimize(&mut self) -> Result<()> {
        self.state.minimize();
        self.state.save(self.store, &self.origin).await
    }

    pub async fn toggle_section(&mut self, section: Section) -> Result<bool> {
        let open = self.state.toggle_section(section);
        self.state.save(self.store, &self.origin).await?;
        Ok(open)
    }
}

/// Origin a page's panel state is stored under.
pub fn origin_of(url: &str) -> Result<String> {
    Ok(Url::parse(url)?.origin().ascii_serialization())
}
