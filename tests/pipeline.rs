use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use property_scout::analysis::Analyzer;
use property_scout::bridge::{AgentHandle, ContentAgent};
use property_scout::config::{ScoutConfig, WaitConfig};
use property_scout::models::{CrimeLevel, Source};
use property_scout::panel::{origin_of, Panel, PanelState, Section};
use property_scout::render::{render_charts, render_panel, text_report, PanelView, TextCharts};
use property_scout::scrapers::{Extractor, StaticPage};
use property_scout::store::LocalStore;
use property_scout::ScoutError;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

async fn agent_for(url: &str, file: &str, store: Arc<LocalStore>) -> AgentHandle {
    let page = StaticPage::from_file(url, &fixture(file)).await.unwrap();
    let extractor = Arc::new(Extractor::new(WaitConfig::default()));
    ContentAgent::new(extractor, Arc::new(page), store).spawn(Duration::from_secs(30))
}

#[tokio::test]
async fn test_page_scores_as_high_crime() {
    let store = Arc::new(LocalStore::in_memory());
    let agent = agent_for("file:///srv/fixtures/test.html", "test.html", store.clone()).await;

    let record = agent.load_record(&store).await.unwrap();
    assert_eq!(record.source, Source::TestFixture);
    assert_eq!(record.address.as_deref(), Some("123 Main St, Compton"));
    assert_eq!(record.price, Some(90_000));
    assert_eq!(record.year_built, Some(1940));

    let analysis = Analyzer::seeded(42).analyze(&record);
    assert!(analysis.crime_risk.level >= CrimeLevel::High);
    assert!(analysis.crime_risk.factors.iter().any(|f| f.contains("compton")));
}

#[tokio::test]
async fn zillow_page_renders_full_panel() {
    let store = Arc::new(LocalStore::in_memory());
    let url = "https://www.zillow.com/homedetails/742-Valencia-St/1_zpid/";
    let agent = agent_for(url, "zillow.html", store.clone()).await;

    let record = agent.load_record(&store).await.unwrap();
    assert_eq!(record.source, Source::Zillow);
    assert_eq!(record.price, Some(1_295_000));
    assert_eq!(record.bedrooms, Some(2));
    assert_eq!(record.square_footage, Some(1150));
    assert_eq!(record.year_built, Some(1908));
    assert_eq!(record.latitude, Some(37.7599));

    let analysis = Analyzer::seeded(7).analyze(&record);
    assert_eq!(analysis.price_analysis.price_per_sqft, 1126);

    let charts = render_charts(&TextCharts::default(), &analysis, record.price, &WaitConfig::default()).await;
    assert!(charts.price_comparison.contains("Property Price"));
    assert_eq!(charts.demographics.lines().count(), 5);

    let state = PanelState::default();
    let html = render_panel(&PanelView {
        record: &record,
        analysis: &analysis,
        charts: &charts,
        state: &state,
    });
    assert!(!html.contains("{{"));
    assert!(html.contains("742 Valencia St"));

    let report = text_report(&record, &analysis, &charts, &state);
    assert!(report.starts_with("742 Valencia St, San Francisco, CA 94110 [Zillow]"));
}

#[tokio::test]
async fn embedded_record_is_read_on_any_host() {
    let store = Arc::new(LocalStore::in_memory());
    let agent = agent_for("https://listings.example.com/55-birch", "embedded.html", store.clone()).await;

    let record = agent.load_record(&store).await.unwrap();
    assert_eq!(record.source, Source::TestFixture);
    assert_eq!(record.price, Some(2_400_000));
    assert_eq!(record.bathrooms, Some(3.5));
    assert_eq!(record.square_footage, Some(2600));
}

#[tokio::test]
async fn cache_survives_reopen_and_covers_unsupported_pages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = Arc::new(LocalStore::open(&path).await.unwrap());
        let agent = agent_for("file:///srv/fixtures/test.html", "test.html", store.clone()).await;
        agent.load_record(&store).await.unwrap();
    }

    let store = Arc::new(LocalStore::open(&path).await.unwrap());
    let agent = agent_for("https://example.com/about", "zillow.html", store.clone()).await;
    let record = agent.load_record(&store).await.unwrap();
    assert_eq!(record.address.as_deref(), Some("123 Main St, Compton"));

    assert!(store.clear_cache().await.unwrap());
    let err = agent.load_record(&store).await.unwrap_err();
    assert!(matches!(err, ScoutError::NoPropertyData));
}

#[tokio::test]
async fn panel_state_persists_to_disk_per_origin() {
    let dir = TempDir::new().unwrap();
    let config = ScoutConfig::from_toml(&format!(
        "[storage]\npath = {:?}\n",
        dir.path().join("store.json")
    ))
    .unwrap();
    let origin = origin_of("https://www.redfin.com/CA/Oakland/1/home/2").unwrap();

    {
        let store = LocalStore::open(config.storage.resolved_path()).await.unwrap();
        let mut panel = Panel::open(&store, origin.clone()).await.unwrap();
        panel.minimize().await.unwrap();
        panel.toggle_section(Section::Demographics).await.unwrap();
    }

    let store = LocalStore::open(config.storage.resolved_path()).await.unwrap();
    let state = PanelState::load(&store, &origin).await.unwrap();
    assert!(!state.is_open(Section::Demographics));
    assert!(state.is_open(Section::CrimeRisk));

    let other = PanelState::load(&store, "https://www.zillow.com").await.unwrap();
    assert_eq!(other, PanelState::default());
}
