//! CLI entry point for pubstats.
//!
//! Provides subcommands for the COVID-19 dashboard statistics pipeline and
//! for ACM Turing Award recipient lookups and intro text statistics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pubstats::config::{AppConfig, CompletenessFilter};
use pubstats::fetch::{BasicClient, DefaultHeader};
use pubstats::infra::coronavirus::CoronavirusClient;
use pubstats::infra::wikidata::WikidataClient;
use pubstats::infra::wikipedia::WikipediaClient;
use pubstats::output::{
    covid_table, missing_table, print_json, print_table, text_table, write_records,
    write_text_summaries, write_wide_csv,
};
use pubstats::text::TextToolkit;
use pubstats::{covid, turing};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "pubstats")]
#[command(about = "Public COVID-19 statistics and Turing Award text statistics", long_about = None)]
struct Cli {
    /// JSON config file; built-in defaults when omitted
    #[arg(long, global = true, env = "PUBSTATS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, clean and smooth nation and region statistics
    Covid {
        /// Directory to write covid_data.csv and vaccinations_wide.csv to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Maximum number of pages to fetch per query
        #[arg(long)]
        max_pages: Option<u32>,

        /// Which cumulative fields a row must have after gap-filling
        #[arg(long, value_enum)]
        completeness_filter: Option<CompletenessFilter>,

        /// Number of smoothed rows to print
        #[arg(long, default_value_t = 10)]
        head: usize,
    },
    /// List Turing Award recipients alphabetically
    Recipients,
    /// Show details for one recipient
    Winner {
        /// Wikidata entity id, e.g. Q92638
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Summarize the Wikipedia introductions of all recipients
    Intros {
        /// Number of summary rows to print
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// CSV file to write all summaries to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/pubstats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("pubstats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("RUST_LOG")
        .from_env()
        .context("invalid RUST_LOG")?;
    let json_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .with_env_var("RUST_LOG_JSON")
        .from_env()
        .context("invalid RUST_LOG_JSON")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(json_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing()?;

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Covid {
            output_dir,
            max_pages,
            completeness_filter,
            head,
        } => {
            if let Some(max_pages) = max_pages {
                config.covid.max_pages = max_pages;
            }
            if let Some(filter) = completeness_filter {
                config.covid.completeness_filter = filter;
            }
            config.validate()?;

            run_covid(&config, output_dir.as_deref(), head).await?;
        }
        Commands::Recipients => {
            let kg = wikidata(&config)?;
            let recipients = turing::recipients(&kg).await?;
            info!(total = recipients.len(), "Recipients fetched");

            for name in turing::sorted_names(&recipients) {
                println!("{name}");
            }
        }
        Commands::Winner { id } => {
            let kg = wikidata(&config)?;
            let encyclopedia = wikipedia(&config)?;

            let details = turing::winner_details(&kg, &encyclopedia, &id)
                .await
                .with_context(|| format!("fetching details for {id}"))?;
            print_json(&details)?;
        }
        Commands::Intros { limit, output } => {
            run_intros(&config, limit, output.as_deref()).await?;
        }
    }

    Ok(())
}

fn wikidata(config: &AppConfig) -> Result<WikidataClient<DefaultHeader<BasicClient>>> {
    let http = DefaultHeader::accept_json(BasicClient::new(&config.http)?);
    Ok(WikidataClient::new(
        http,
        &config.endpoints.sparql_url,
        &config.endpoints.wikidata_api_url,
    ))
}

fn wikipedia(config: &AppConfig) -> Result<WikipediaClient<BasicClient>> {
    Ok(WikipediaClient::new(
        BasicClient::new(&config.http)?,
        &config.endpoints.wikipedia_api_url,
    ))
}

/// Runs the statistics pipeline, prints its tables and optionally writes
/// the smoothed and wide tables as CSV.
#[tracing::instrument(skip(config), fields(max_pages = config.covid.max_pages))]
async fn run_covid(config: &AppConfig, output_dir: Option<&Path>, head: usize) -> Result<()> {
    let api = CoronavirusClient::new(
        BasicClient::new(&config.http)?,
        &config.endpoints.statistics_url,
        config.covid.max_pages,
    );

    let report = covid::run(&api, &config.covid).await?;

    print_table("Missing data before gap-filling", &missing_table(&report.missing));
    print_table("Smoothed statistics", &covid_table(&report.rows, head));

    let Some(dir) = output_dir else {
        return Ok(());
    };
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write_records(&dir.join("covid_data.csv"), &report.rows)?;

    let wide: Vec<_> = report.vaccinations(&config.covid).collect();
    write_wide_csv(&dir.join("vaccinations_wide.csv"), &wide)?;

    info!(
        output_dir = %dir.display(),
        rows = report.rows.len(),
        vaccination_rows = wide.len(),
        "Statistics written"
    );
    Ok(())
}

/// Fetches every recipient's intro, summarizes the texts and prints the
/// first `limit` summaries.
#[tracing::instrument(skip(config))]
async fn run_intros(config: &AppConfig, limit: usize, output: Option<&Path>) -> Result<()> {
    let toolkit = TextToolkit::init(&config.text)?;
    let kg = wikidata(config)?;
    let encyclopedia = wikipedia(config)?;

    let recipients = turing::recipients(&kg).await?;
    info!(total = recipients.len(), "Recipients fetched");

    let entries = turing::collect_intros(&kg, &encyclopedia, &recipients).await;
    let summaries = turing::summarize_intros(&entries, &toolkit, config.text.top_n);

    let shown = &summaries[..limit.min(summaries.len())];
    print_table("Intro text statistics", &text_table(shown));

    if let Some(path) = output {
        write_text_summaries(path, &summaries)?;
        info!(path = %path.display(), rows = summaries.len(), "Summaries written");
    }
    Ok(())
}
