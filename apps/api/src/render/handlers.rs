//! Axum route handlers for the LaTeX render API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, info_span};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::render::{render, render_with_diagnostics, Diagnostic};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Exactly one of `template_id` / `template`, and at most one of
/// `resume` / `data`.
#[derive(Debug, Deserialize)]
pub struct RenderLatexRequest {
    pub template_id: Option<String>,
    pub template: Option<String>,
    pub resume: Option<ResumeData>,
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RenderLatexResponse {
    pub render_id: Uuid,
    pub document: String,
    pub diagnostics: Vec<Diagnostic>,
    pub generated_at: DateTime<Utc>,
}

/// A validated render request: the template source and the substitution map.
struct RenderJob {
    label: String,
    template: String,
    data: Value,
}

impl RenderLatexRequest {
    fn into_job(self, state: &AppState) -> Result<RenderJob, AppError> {
        let (label, template) = match (self.template_id, self.template) {
            (Some(_), Some(_)) => {
                return Err(AppError::Validation(
                    "Provide either template_id or template, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(AppError::Validation(
                    "One of template_id or template is required".to_string(),
                ))
            }
            (Some(id), None) => {
                let source = state
                    .templates
                    .get(&id)
                    .ok_or_else(|| AppError::NotFound(format!("Template '{id}' not found")))?;
                (id, source.to_string())
            }
            (None, Some(source)) => ("inline".to_string(), source),
        };

        if template.len() > state.config.max_template_bytes {
            return Err(AppError::Validation(format!(
                "Template is {} bytes; the limit is {}",
                template.len(),
                state.config.max_template_bytes
            )));
        }

        let data = match (self.resume, self.data) {
            (Some(_), Some(_)) => {
                return Err(AppError::Validation(
                    "Provide either resume or data, not both".to_string(),
                ))
            }
            (Some(resume), None) => resume.to_substitution_map(),
            (None, Some(data)) => data,
            (None, None) => Value::Object(Map::new()),
        };

        Ok(RenderJob {
            label,
            template,
            data,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/render/latex
///
/// Renders resume data into a LaTeX template and returns the document with
/// the diagnostics collected along the way.
pub async fn handle_render_latex(
    State(state): State<AppState>,
    Json(request): Json<RenderLatexRequest>,
) -> Result<Json<RenderLatexResponse>, AppError> {
    let job = request.into_job(&state)?;
    let render_id = Uuid::new_v4();
    let _span = info_span!("render", %render_id, template = %job.label).entered();

    let output = render_with_diagnostics(&job.template, &job.data);
    for diagnostic in &output.diagnostics {
        diagnostic.log();
    }
    info!(
        bytes = output.document.len(),
        diagnostics = output.diagnostics.len(),
        "LaTeX document rendered"
    );

    Ok(Json(RenderLatexResponse {
        render_id,
        document: output.document,
        diagnostics: output.diagnostics,
        generated_at: Utc::now(),
    }))
}

/// POST /api/v1/render/latex/raw
///
/// Same input as `/render/latex`; responds with the bare `.tex` source for
/// direct download or hand-off to a LaTeX compiler.
pub async fn handle_render_latex_raw(
    State(state): State<AppState>,
    Json(request): Json<RenderLatexRequest>,
) -> Result<Response, AppError> {
    let job = request.into_job(&state)?;
    let _span = info_span!("render_raw", template = %job.label).entered();

    let document = render(&job.template, &job.data);

    Ok(([(header::CONTENT_TYPE, "application/x-tex; charset=utf-8")], document).into_response())
}
