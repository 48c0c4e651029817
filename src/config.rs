//! Runtime configuration loaded from TOML.
//!
//! Every section is optional. A missing file yields [`ScoutConfig::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

const CONFIG_DIR: &str = "property-scout";
const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "store.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub wait: WaitConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Readiness polling for client-rendered pages and the chart backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra settle time after a tolerated readiness timeout.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl WaitConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

/// Fallbacks and knobs for the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_price")]
    pub default_price: i64,

    #[serde(default = "default_square_footage")]
    pub default_square_footage: i64,

    #[serde(default = "default_bedrooms")]
    pub default_bedrooms: u32,

    #[serde(default = "default_bathrooms")]
    pub default_bathrooms: f64,

    #[serde(default = "default_year_built")]
    pub default_year_built: i32,

    /// Price divided by this gives the area's median income.
    #[serde(default = "default_income_ratio")]
    pub income_ratio: f64,

    /// Share of the price charged as monthly rent.
    #[serde(default = "default_rent_rate")]
    pub rent_rate: f64,

    #[serde(default = "default_comp_count")]
    pub comp_count: usize,

    #[serde(default = "default_viability_minimum")]
    pub viability_minimum: u32,

    /// Artificial latency before analysis output is produced.
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,
}

impl ScoringConfig {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_price: default_price(),
            default_square_footage: default_square_footage(),
            default_bedrooms: default_bedrooms(),
            default_bathrooms: default_bathrooms(),
            default_year_built: default_year_built(),
            income_ratio: default_income_ratio(),
            rent_rate: default_rent_rate(),
            comp_count: default_comp_count(),
            viability_minimum: default_viability_minimum(),
            analysis_delay_ms: default_analysis_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl BridgeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file; defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(CONFIG_DIR)
                .join(STORE_FILE)
        })
    }
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_settle_ms() -> u64 {
    2000
}

fn default_price() -> i64 {
    500_000
}

fn default_square_footage() -> i64 {
    2000
}

fn default_bedrooms() -> u32 {
    3
}

fn default_bathrooms() -> f64 {
    2.0
}

fn default_year_built() -> i32 {
    2000
}

fn default_income_ratio() -> f64 {
    3.5
}

fn default_rent_rate() -> f64 {
    0.008
}

fn default_comp_count() -> usize {
    10
}

fn default_viability_minimum() -> u32 {
    3
}

fn default_analysis_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

impl ScoutConfig {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the default location if it exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
