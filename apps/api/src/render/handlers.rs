//! Axum route handlers for the print view and PDF download.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::render::compose::{compose, RenderMode};
use crate::render::export::{
    attachment_filename, content_disposition, render_for_print, PDF_CONTENT_TYPE,
};
use crate::state::AppState;

/// GET /api/v1/resumes/:id/print
///
/// Print-mode HTML that opens the browser print dialog on load.
pub async fn handle_print(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Response, AppError> {
    let record = state.repo.get(&resume_id).await?;
    let document = compose(record.as_ref(), RenderMode::Print, &state.compose_options)?;
    info!(%resume_id, mode = ?document.mode, "print view generated");
    let view = render_for_print(document.markup);

    Ok(([(header::CONTENT_TYPE, view.content_type)], view.html).into_response())
}

/// GET /api/v1/resumes/:id/download
///
/// Export-mode markup converted to PDF and served as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Response, AppError> {
    let record = state.repo.get(&resume_id).await?;
    let document = compose(record.as_ref(), RenderMode::Export, &state.compose_options)?;

    let pdf = state
        .exporter
        .render_for_download(&document.markup, state.config.pdf_timeout)
        .await?;

    let filename = attachment_filename(record.as_ref().and_then(|r| r.full_name.as_deref()));
    info!(%resume_id, %filename, bytes = pdf.len(), "PDF download ready");

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
