use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use property_scout::analysis::Analyzer;
use property_scout::bridge::{ContentAgent, Request};
use property_scout::config::ScoutConfig;
use property_scout::panel::{origin_of, Panel, PanelMode, PanelState, Section};
use property_scout::render::{render_charts, render_panel, text_report, PanelView, TextCharts};
use property_scout::scrapers::{BrowserPage, Extractor, PageSource, StaticPage};
use property_scout::store::LocalStore;

#[derive(Parser)]
#[command(author, version, about = "Scrape a listing page and score the neighborhood around it")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct PageArgs {
    /// Listing URL. With --file, the address the page was saved from.
    url: String,

    /// Read the page from a saved HTML file instead of fetching it
    #[arg(long, conflicts_with = "browser")]
    file: Option<PathBuf>,

    /// Render the page in headless Chrome
    #[arg(long)]
    browser: bool,

    /// Save the rendered HTML and a screenshot here (with --browser)
    #[arg(long, requires = "browser")]
    debug_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the listing and print it as JSON
    Scrape {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Extract, score and render the panel
    Analyze {
        #[command(flatten)]
        page: PageArgs,

        /// Seed the scorer for repeatable output
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the HTML panel to this file
        #[arg(long)]
        html: Option<PathBuf>,

        /// Number of times to refresh (re-scrape and re-score)
        #[arg(long, default_value_t = 1)]
        runs: u32,
    },

    /// Inspect or change the stored panel state for a site
    Panel {
        /// Any URL on the site
        url: String,

        #[command(subcommand)]
        action: PanelAction,
    },

    /// Inspect or clear the cached listing
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum PanelAction {
    Show,
    Expand,
    Minimize,
    /// Open or close one section, e.g. `crime-risk`
    Toggle { section: Section },
}

#[derive(Subcommand)]
enum CacheAction {
    Show,
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ScoutConfig::load_or_default(cli.config.as_deref())?;
    let store = Arc::new(LocalStore::open(config.storage.resolved_path()).await?);

    match cli.command {
        Command::Scrape { page } => scrape(&config, store, &page).await,
        Command::Analyze {
            page,
            seed,
            html,
            runs,
        } => analyze(&config, store, &page, seed, html, runs).await,
        Command::Panel { url, action } => panel(&store, &url, action).await,
        Command::Cache { action } => cache(&store, action).await,
    }
}

async fn open_page(args: &PageArgs, config: &ScoutConfig) -> Result<Arc<dyn PageSource>> {
    if let Some(path) = &args.file {
        return Ok(Arc::new(StaticPage::from_file(args.url.clone(), path).await?));
    }
    if args.browser {
        let page = BrowserPage::open(&args.url).await?;
        if let Some(dir) = &args.debug_dir {
            page.save_debug_artifacts(dir).await?;
        }
        return Ok(Arc::new(page));
    }
    Ok(Arc::new(StaticPage::fetch(&args.url, &config.http).await?))
}

async fn scrape(config: &ScoutConfig, store: Arc<LocalStore>, args: &PageArgs) -> Result<()> {
    let page = open_page(args, config).await?;
    let extractor = Arc::new(Extractor::new(config.wait.clone()));
    let agent = ContentAgent::new(extractor, page, store).spawn(config.bridge.request_timeout());

    let response = agent.send(Request::ScrapePropertyData).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn analyze(
    config: &ScoutConfig,
    store: Arc<LocalStore>,
    args: &PageArgs,
    seed: Option<u64>,
    html: Option<PathBuf>,
    runs: u32,
) -> Result<()> {
    let page = open_page(args, config).await?;
    let origin = origin_of(page.url())?;
    let extractor = Arc::new(Extractor::new(config.wait.clone()));
    let agent =
        ContentAgent::new(extractor, page, Arc::clone(&store)).spawn(config.bridge.request_timeout());

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut analyzer = Analyzer::with_config(config.scoring.clone(), rng);
    let backend = TextCharts::default();

    for run in 1..=runs.max(1) {
        if run > 1 {
            info!("Refreshing analysis ({}/{})", run, runs);
        }
        let record = agent.load_record(&store).await?;
        let analysis = analyzer.analyze_delayed(&record).await;
        let charts = render_charts(&backend, &analysis, record.price, &config.wait).await;
        let state = PanelState::load(&store, &origin).await?;

        println!("{}", text_report(&record, &analysis, &charts, &state));

        if let Some(path) = &html {
            let panel = render_panel(&PanelView {
                record: &record,
                analysis: &analysis,
                charts: &charts,
                state: &state,
            });
            tokio::fs::write(path, panel)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote panel to {}", path.display());
        }
    }
    Ok(())
}

async fn panel(store: &LocalStore, url: &str, action: PanelAction) -> Result<()> {
    let mut panel = Panel::open(store, origin_of(url)?).await?;
    match action {
        PanelAction::Show => {}
        PanelAction::Expand => panel.expand().await?,
        PanelAction::Minimize => panel.minimize().await?,
        PanelAction::Toggle { section } => {
            let open = panel.toggle_section(section).await?;
            info!("{} is now {}", section.title(), if open { "open" } else { "closed" });
        }
    }

    let state = panel.state();
    let mode = match state.mode {
        PanelMode::Expanded => "expanded",
        PanelMode::Minimized => "minimized",
    };
    println!("{} ({})", panel.origin(), mode);
    for section in Section::ALL {
        let marker = if state.is_open(section) { "▲" } else { "▼" };
        println!("  {marker} {:<16} {}", section.id(), section.title());
    }
    Ok(())
}

async fn cache(store: &LocalStore, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Show => match store.cached_record().await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("No cached property data"),
        },
        CacheAction::Clear => {
            if store.clear_cache().await? {
                println!("Cleared cached property data");
            } else {
                println!("Cache was already empty");
            }
        }
    }
    Ok(())
}
