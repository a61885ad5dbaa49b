use analytics::MetricsEngine;
use axum::{routing::get, Router};
use configuration::Config;
use core_types::{CompanySelection, SalesTable};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
// Note: Tracing is handled by whoever calls `run_server`.

pub mod handlers;

/// The shared application state that all handlers can access.
///
/// The table is immutable, so handlers read it concurrently without locking.
pub struct AppState {
    pub table: SalesTable,
    pub engine: MetricsEngine,
    pub default_company: CompanySelection,
}

impl AppState {
    pub fn new(table: SalesTable, config: &Config) -> Self {
        Self {
            table,
            engine: MetricsEngine::new(config.map.highlighted, config.map.default),
            default_company: config.dashboard.default_company.clone(),
        }
    }
}

/// Builds the application routes.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/companies", get(handlers::get_companies))
        .route("/api/date-span", get(handlers::get_date_span))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/records", get(handlers::get_records))
        .route("/api/map", get(handlers::get_map))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Serves the dashboard API until Ctrl-C is received.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
    }
}
