pub mod health;

use axum::{routing::get, Router};

use crate::render::handlers as render;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume CRUD
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list).post(resumes::handle_create),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get)
                .put(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        // Render API
        .route("/api/v1/resumes/:id/print", get(render::handle_print))
        .route("/api/v1/resumes/:id/download", get(render::handle_download))
        .with_state(state)
}
