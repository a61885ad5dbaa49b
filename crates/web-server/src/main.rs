use anyhow::Context;
use std::net::SocketAddr;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use web_server::AppState;

// This main function is the entry point when running `cargo run -p web-server`.
// It loads `dashboard.toml` and the dataset, then hands over to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config(Path::new("dashboard.toml"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let table = dataset::load_sales_table(&config.data.path)
        .with_context(|| format!("Failed to load {}", config.data.path.display()))?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    web_server::run_server(addr, AppState::new(table, &config)).await
}
