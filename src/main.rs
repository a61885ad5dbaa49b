use analytics::MetricsEngine;
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, LoggingSettings, OutputFormat};
use core_types::{CompanySelection, DateSelection, FilterState, SalesTable};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use web_server::AppState;

mod render;

/// The main entry point for the sales dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; it only feeds DASHBOARD__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(data) = cli.data {
        config.data.path = data;
    }

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = init_tracing(&config.logging)?;

    let table = dataset::load_sales_table(&config.data.path)
        .with_context(|| format!("Failed to load dataset {}", config.data.path.display()))?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config, &table),
        Commands::Export(args) => handle_export(args, &config, &table),
        Commands::Companies => {
            for option in table.company_options() {
                println!("{}", option);
            }
            Ok(())
        }
        Commands::Serve(args) => handle_serve(args, config, table).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sales metrics over a processed sales-order-items file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "dashboard.toml")]
    config: PathBuf,

    /// Overrides the dataset path from the configuration.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard for a date range and company.
    Report(ReportArgs),
    /// Write the dashboard for a date range and company as JSON.
    Export(ExportArgs),
    /// List the company selector options.
    Companies,
    /// Serve the dashboard as a JSON HTTP API.
    Serve(ServeArgs),
}

/// The dashboard controls. Leaving out either date selects the full span.
#[derive(Args)]
struct FilterArgs {
    /// First day to include (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to include (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// A company name, or "All".
    #[arg(long)]
    company: Option<String>,
}

impl FilterArgs {
    fn into_filter_state(self, config: &Config) -> FilterState {
        let company = self
            .company
            .map(CompanySelection::from)
            .unwrap_or_else(|| config.dashboard.default_company.clone());
        FilterState::new(DateSelection::new(self.from, self.to), company)
    }
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Number of data-table rows to print.
    #[arg(long)]
    limit: Option<usize>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// The output file path for the JSON report.
    #[arg(long, short)]
    output: PathBuf,
}

#[derive(Args)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber: stderr always, plus a daily rolling file
/// when `logging.directory` is configured. `RUST_LOG` wins over `logging.level`.
fn init_tracing(settings: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log level '{}'", settings.level))?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn engine_for(config: &Config) -> MetricsEngine {
    MetricsEngine::new(config.map.highlighted, config.map.default)
}

/// Handles the `report` command.
fn handle_report(args: ReportArgs, config: &Config, table: &SalesTable) -> anyhow::Result<()> {
    let filter = args.filter.into_filter_state(config);
    let report = engine_for(config).build_dashboard(table, &filter);

    match args.format.unwrap_or(config.dashboard.output_format) {
        OutputFormat::Table => {
            let limit = args.limit.unwrap_or(config.dashboard.record_limit);
            let text = render::render_dashboard(&report, &config.dashboard.title, limit)?;
            print!("{}", text);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

/// Handles the `export` command.
fn handle_export(args: ExportArgs, config: &Config, table: &SalesTable) -> anyhow::Result<()> {
    let filter = args.filter.into_filter_state(config);
    let report = engine_for(config).build_dashboard(table, &filter);

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    tracing::info!(
        path = %args.output.display(),
        records = report.records.len(),
        "Dashboard exported."
    );
    Ok(())
}

/// Handles the `serve` command.
async fn handle_serve(args: ServeArgs, config: Config, table: SalesTable) -> anyhow::Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid server address {}:{}", host, port))?;

    web_server::run_server(addr, AppState::new(table, &config)).await
}
