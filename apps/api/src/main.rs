mod ai_client;
mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod models;
mod render;
mod resumes;
mod routes;
mod state;
mod store;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::GeminiClient;
use crate::auth::HttpIdentityProvider;
use crate::config::Config;
use crate::db::create_pool;
use crate::render::template_store::HttpTemplateStore;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_name, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillForge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (pool + migrations)
    let db = create_pool(&config.database_url).await?;

    // External collaborators
    let ai = GeminiClient::new(config.gemini_api_url.clone(), config.gemini_api_key.clone());
    info!("Gemini client initialized");

    let templates = HttpTemplateStore::new(config.template_base_url.clone());
    let identity = HttpIdentityProvider::new(
        config.identity_url.clone(),
        config.identity_service_key.clone(),
    );

    // Build app state
    let state = AppState {
        store: Arc::new(PgResumeStore::new(db)),
        ai: Arc::new(ai),
        templates: Arc::new(templates),
        identity: Arc::new(identity),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the CORS layer from the configured allow-list.
/// An empty list falls back to permissive (local development).
fn build_cors(config: &Config) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
