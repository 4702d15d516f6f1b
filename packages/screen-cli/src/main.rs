//! Lodging Facility Screening CLI
//!
//! Reads a facility list, looks each facility up through the chosen search
//! backend, and writes the official site, OTA listings and (in eligibility
//! mode) the sales-target verdict for every row.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use facility_screen::providers::{BraveSearchProvider, HttpPageFetcher, SerpApiProvider};
use facility_screen::security::ApiKey;
use facility_screen::{
    BatchOutcome, BatchRunner, BatchSummary, FacilityRecord, LookupProvider, OfficialPolicy,
    ReferenceTables, ScreenConfig, ScreenMode,
};
use screen_cli::config::parse_secs;
use screen_cli::{rows, Config, ProviderKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Official site and OTA listings only
    Sites,
    /// Sites plus the sales-target verdict
    Eligibility,
}

impl From<ModeArg> for ScreenMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sites => ScreenMode::Sites,
            ModeArg::Eligibility => ScreenMode::Eligibility,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "screen",
    version,
    about = "Find official sites and OTA listings for lodging facilities and flag sales targets"
)]
struct Args {
    /// Input CSV; the first column holds the facility name
    input: PathBuf,

    /// Output CSV
    #[arg(short, long, default_value = "result.csv")]
    output: PathBuf,

    /// Search backend
    #[arg(long, value_enum, default_value_t = ProviderKind::Brave)]
    provider: ProviderKind,

    #[arg(long, value_enum, default_value_t = ModeArg::Eligibility)]
    mode: ModeArg,

    /// Process at most this many rows [env: SCREEN_LIMIT]
    #[arg(long)]
    limit: Option<usize>,

    /// Seconds between search calls, clamped to 0.5..=5 [env: SCREEN_DELAY_SECS]
    #[arg(long)]
    delay_secs: Option<String>,

    /// Per-call timeout in seconds [env: SCREEN_TIMEOUT_SECS]
    #[arg(long)]
    timeout_secs: Option<String>,

    /// JSON file overriding any of the built-in reference tables
    #[arg(long, env = "SCREEN_TABLES")]
    tables: Option<PathBuf>,

    /// API key; defaults to BRAVE_API_KEY or SERPAPI_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Require both the official marker and a name match to accept a site
    #[arg(long)]
    strict_official: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,facility_screen=debug,screen_cli=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let api_key = match args.api_key.as_deref().and_then(ApiKey::parse) {
        Some(key) => key,
        None => config.api_key(args.provider)?,
    };

    let tables = Arc::new(load_tables(args.tables.as_ref())?);
    let screen_config = screen_config(&args, &config)?;
    let call_timeout = screen_config.call_timeout;
    let mode = screen_config.mode;

    let facilities = rows::read_facilities(&args.input)?;
    if facilities.is_empty() {
        tracing::warn!(input = %args.input.display(), "No facilities found in input");
    }

    tracing::info!(
        provider = ?args.provider,
        api_key = %api_key,
        mode = ?mode,
        rows = facilities.len(),
        delay = ?screen_config.call_delay,
        "Starting screening run"
    );

    let fetcher = HttpPageFetcher::new().with_timeout(call_timeout);
    let outcome = match args.provider {
        ProviderKind::Brave => {
            let provider = BraveSearchProvider::new(api_key).with_timeout(call_timeout);
            run_batch(provider, fetcher, tables, screen_config, &facilities).await?
        }
        ProviderKind::Serpapi => {
            let provider = SerpApiProvider::new(api_key).with_timeout(call_timeout);
            run_batch(provider, fetcher, tables, screen_config, &facilities).await?
        }
    };

    rows::save_outcome(&args.output, &outcome, mode)?;

    let summary = BatchSummary::from_outcome(&outcome);
    tracing::info!(?summary, output = %args.output.display(), "Screening run finished");
    print_summary(&summary, mode, &args.output);

    Ok(())
}

fn load_tables(path: Option<&PathBuf>) -> Result<ReferenceTables> {
    let Some(path) = path else {
        return Ok(ReferenceTables::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tables file {}", path.display()))?;
    let tables = ReferenceTables::from_json_str(&json)
        .with_context(|| format!("Failed to load tables file {}", path.display()))?;
    tracing::info!(path = %path.display(), "Loaded reference tables");
    Ok(tables)
}

/// Flags win over environment values; the library defaults fill the rest.
fn screen_config(args: &Args, config: &Config) -> Result<ScreenConfig> {
    let mut screen_config = ScreenConfig::new().with_mode(args.mode.into());

    let delay = match &args.delay_secs {
        Some(raw) => Some(parse_secs(raw).context("--delay-secs")?),
        None => config.call_delay,
    };
    if let Some(delay) = delay {
        screen_config = screen_config.with_call_delay(delay);
    }

    let timeout = match &args.timeout_secs {
        Some(raw) => Some(parse_secs(raw).context("--timeout-secs")?),
        None => config.call_timeout,
    };
    if let Some(timeout) = timeout {
        screen_config = screen_config.with_call_timeout(timeout);
    }

    if let Some(limit) = args.limit.or(config.max_rows) {
        screen_config = screen_config.with_max_rows(limit);
    }

    if args.strict_official {
        screen_config = screen_config.with_official_policy(OfficialPolicy::AllSignals);
    }

    screen_config.validate()?;
    Ok(screen_config)
}

async fn run_batch<P: LookupProvider>(
    provider: P,
    fetcher: HttpPageFetcher,
    tables: Arc<ReferenceTables>,
    screen_config: ScreenConfig,
    facilities: &[FacilityRecord],
) -> Result<BatchOutcome> {
    let runner = BatchRunner::new(provider, fetcher, tables, screen_config)?;

    let outcome = runner
        .run(facilities, |progress| {
            println!(
                "{} {}",
                format!("[{}/{}]", progress.processed, progress.total).bright_cyan(),
                progress.facility
            );
        })
        .await;

    Ok(outcome)
}

fn print_summary(summary: &BatchSummary, mode: ScreenMode, output: &std::path::Path) {
    println!();
    println!("{}", "Screening complete".bright_green().bold());
    println!("  Rows:              {}", summary.total);

    match mode {
        ScreenMode::Sites => {
            println!("  With official site: {}", summary.with_official_site);
            println!("  With OTA listing:   {}", summary.with_ota_listing);
            println!("  No site found:      {}", summary.without_any_site);
        }
        ScreenMode::Eligibility => {
            println!("  Targets:           {}", summary.targets.to_string().bright_green());
            println!("  Non-targets:       {}", summary.non_targets);
        }
    }

    if summary.failed > 0 {
        println!("  Failed:            {}", summary.failed.to_string().bright_red());
    }
    println!("  Output:            {}", output.display());
}
