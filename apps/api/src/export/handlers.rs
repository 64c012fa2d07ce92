//! Axum route handlers for the export API.

use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::export::{compute_completeness, to_plain_text, CompletenessReport};
use crate::models::resume::ResumeData;

#[derive(Debug, Serialize)]
pub struct PlainTextResponse {
    pub text: String,
}

/// POST /api/v1/render/text
pub async fn handle_render_text(
    Json(resume): Json<ResumeData>,
) -> Result<Json<PlainTextResponse>, AppError> {
    Ok(Json(PlainTextResponse {
        text: to_plain_text(&resume),
    }))
}

/// POST /api/v1/resume/completeness
pub async fn handle_completeness(
    Json(resume): Json<ResumeData>,
) -> Result<Json<CompletenessReport>, AppError> {
    Ok(Json(compute_completeness(&resume)))
}
