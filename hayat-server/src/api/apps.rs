use axum::{extract::State, response::Json};
use hayat_client::document::download_filename;
use hayat_types::{Capability, DocumentRequest};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateAppBody {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAppResponse {
    /// Raw single-file HTML, suitable for a sandboxed iframe or a download.
    pub html: String,
    /// Suggested download name derived from the prompt.
    pub filename: String,
}

pub async fn generate_app(
    State(state): State<AppState>,
    Json(body): Json<GenerateAppBody>,
) -> Result<Json<GenerateAppResponse>, ApiError> {
    let request = DocumentRequest::new(body.prompt);
    let html = state
        .client()
        .generate_document(&request)
        .await
        .map_err(|e| ApiError::generation(e, Capability::Document))?;

    Ok(Json(GenerateAppResponse { html, filename: download_filename(&request.prompt) }))
}
