mod config;
mod db;
mod errors;
mod models;
mod render;
mod repository;
mod resumes;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::render::{ComposeOptions, Exporter, ProcessPdfConverter};
use crate::repository::{InMemoryResumeRepository, PgResumeRepository, ResumeRepository};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Storage: PostgreSQL when configured, otherwise process memory
    let repo: Arc<dyn ResumeRepository> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgResumeRepository::new(pool))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory resume storage");
            Arc::new(InMemoryResumeRepository::new())
        }
    };

    // PDF converter: one external process per call, bounded pool
    let converter = ProcessPdfConverter::new(
        config.pdf_converter_bin.clone(),
        config.pdf_converter_args.clone(),
        config.pdf_max_concurrency,
    );
    info!(
        "PDF converter: {} (max {} concurrent, timeout {:?})",
        config.pdf_converter_bin, config.pdf_max_concurrency, config.pdf_timeout
    );

    let compose_options = ComposeOptions {
        url_truncate_threshold: config.url_truncate_threshold,
    };

    // Build app state
    let state = AppState {
        repo,
        exporter: Exporter::new(Arc::new(converter)),
        compose_options,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
