use axum::{routing::get, Router};
use configuration::{Config, DashboardConfig};
use loader::{provider_from_config, RecordProvider};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn RecordProvider>,
    pub dashboard: DashboardConfig,
}

/// Defines the application routes. The API is read-only.
pub fn router(state: Arc<AppState>) -> Router {
    // Only GET routes are exposed, so any origin may read.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/analysts", get(handlers::get_analysts))
        .route("/api/analysts/:member", get(handlers::get_analyst_detail))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let provider = provider_from_config(&config.source, &config.cache);
    let app_state = Arc::new(AppState {
        provider: Arc::new(provider),
        dashboard: config.dashboard.clone(),
    });

    let addr = config.server.addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, router(app_state)).await?;

    Ok(())
}
