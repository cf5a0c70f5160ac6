use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use base64::{engine::general_purpose, Engine as _};
use futures::{Stream, StreamExt};
use hayat_types::{AspectRatio, Capability, GenerationError, ReferenceImage, VideoRequest};
use serde::Deserialize;
use std::convert::Infallible;

use super::{json_event, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageUpload {
    pub mime_type: String,
    /// Base64 file contents, with or without a `data:` URL prefix.
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateVideoBody {
    pub prompt: String,
    #[serde(default = "AspectRatio::widescreen")]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

/// Stream `progress` events until the video is stored.
///
/// The final `progress` event carries the artifact URL. A failure after
/// submission ends the stream with one `error` event and progress reset to 0.
pub async fn generate_video(
    State(state): State<AppState>,
    Json(body): Json<GenerateVideoBody>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let mut request = VideoRequest::new(body.prompt, body.aspect_ratio);
    if let Some(upload) = body.image {
        request = request.with_image(decode_upload(upload)?);
    }

    let mut progress = state
        .client()
        .generate_video(request)
        .map_err(|e| ApiError::generation(e, Capability::Video))?;

    let events = async_stream::stream! {
        while let Some(item) = progress.next().await {
            match item {
                Ok(event) => match serde_json::to_value(&event) {
                    Ok(payload) => yield Ok::<Event, Infallible>(json_event("progress", payload)),
                    Err(e) => {
                        yield Ok(error_event(&GenerationError::backend(e.to_string())));
                        return;
                    }
                },
                Err(e) => {
                    tracing::warn!("Video generation failed: {}", e);
                    yield Ok(error_event(&e));
                    return;
                }
            }
        }
    };

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn decode_upload(upload: ImageUpload) -> Result<ReferenceImage, ApiError> {
    let encoded = match upload.data.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => upload.data.as_str(),
    };
    let data = general_purpose::STANDARD.decode(encoded.trim()).map_err(|_| {
        ApiError::BadRequest("Please select a valid image file (e.g., PNG, JPEG, WEBP).".to_string())
    })?;
    Ok(ReferenceImage::new(upload.mime_type, data))
}

fn error_event(error: &GenerationError) -> Event {
    json_event(
        "error",
        serde_json::json!({ "message": error.user_message(Capability::Video), "progress": 0 }),
    )
}
