use std::sync::Arc;

use crate::config::Config;
use crate::render::compose::ComposeOptions;
use crate::render::export::Exporter;
use crate::repository::ResumeRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// In-memory or PostgreSQL, chosen at startup from `DATABASE_URL`.
    pub repo: Arc<dyn ResumeRepository>,
    pub exporter: Exporter,
    pub compose_options: ComposeOptions,
    pub config: Config,
}
