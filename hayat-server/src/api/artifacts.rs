use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use super::ApiError;
use crate::state::AppState;

pub async fn get_artifact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let artifact = state.artifacts().get(&id).ok_or(ApiError::ArtifactNotFound)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.mime_type),
            (header::CACHE_CONTROL, "private, max-age=3600".to_string()),
        ],
        artifact.data,
    )
        .into_response())
}

/// Release a stored video once the UI no longer shows it.
pub async fn delete_artifact(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.artifacts().revoke(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
