use axum::{extract::State, response::Json};
use hayat_types::{AspectRatio, Capability, ImageRequest};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateImageBody {
    pub prompt: String,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    /// Renderable `data:` URL of the watermarked JPEG.
    pub data_url: String,
    pub mime_type: String,
}

pub async fn generate_image(
    State(state): State<AppState>,
    Json(body): Json<GenerateImageBody>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let request = ImageRequest::new(body.prompt, body.aspect_ratio);
    let payload = state
        .client()
        .generate_image(&request)
        .await
        .map_err(|e| ApiError::generation(e, Capability::Image))?;

    Ok(Json(GenerateImageResponse {
        data_url: payload.to_data_url(),
        mime_type: payload.mime_type,
    }))
}
