pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

/// Build the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Vocabulary routes
        .route(
            "/api/vocabulary",
            get(routes::vocabulary::list).post(routes::vocabulary::create),
        )
        .route("/api/vocabulary/bulk", post(routes::vocabulary::bulk_create))
        .route(
            "/api/vocabulary/:id",
            put(routes::vocabulary::update).delete(routes::vocabulary::delete),
        )
        // Practice routes
        .route("/api/practice/session", get(routes::practice::session))
        .route("/api/practice/answer", post(routes::practice::answer))
        // Known-word routes
        .route("/api/progress/:id/known", post(routes::progress::toggle_known))
        .route("/api/known/all", post(routes::progress::mark_all))
        .route("/api/known/import", post(routes::progress::import))
        .route("/api/known/export", get(routes::progress::export))
        // Stats and settings
        .route("/api/stats", get(routes::stats::report))
        .route(
            "/api/settings",
            get(routes::settings::get).put(routes::settings::update),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        catalog = %config.catalog_path.display(),
        data_dir = %config.data_dir.display(),
        "Loading vocabulary..."
    );
    let store = Store::open(&config.data_dir, &config.catalog_path)?;

    let app = router(AppState {
        store: Arc::new(store),
    });

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
