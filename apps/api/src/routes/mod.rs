pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Templates
        .route("/api/v1/templates", get(templates::handle_list_templates))
        // Render API
        .route("/api/v1/render/latex", post(render::handle_render_latex))
        .route(
            "/api/v1/render/latex/raw",
            post(render::handle_render_latex_raw),
        )
        .route("/api/v1/render/text", post(export::handle_render_text))
        // Resume helpers
        .route(
            "/api/v1/resume/completeness",
            post(export::handle_completeness),
        )
        .with_state(state)
}
