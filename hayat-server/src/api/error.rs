use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use hayat_types::{Capability, GenerationError};
use thiserror::Error;

/// Error returned by API handlers.
///
/// The body is always `{"error": message}`. Generation failures other than
/// validation carry only the capability's generic message; details go to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{source}")]
    Generation { source: GenerationError, capability: Capability },

    #[error("Session not found")]
    SessionNotFound,

    #[error("Artifact not found")]
    ArtifactNotFound,

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn generation(source: GenerationError, capability: Capability) -> Self {
        Self::Generation { source, capability }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Generation { source, .. } => StatusCode::from_u16(source.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::SessionNotFound | Self::ArtifactNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Generation { source, capability } => source.user_message(*capability),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{} request failed: {}", capability_label(&self), self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.user_message() }))).into_response()
    }
}

fn capability_label(error: &ApiError) -> &'static str {
    match error {
        ApiError::Generation { capability: Capability::Chat, .. } => "Chat",
        ApiError::Generation { capability: Capability::Image, .. } => "Image",
        ApiError::Generation { capability: Capability::Video, .. } => "Video",
        ApiError::Generation { capability: Capability::Document, .. } => "App",
        _ => "API",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_failure_hides_details() {
        let err = ApiError::generation(GenerationError::backend("quota exceeded"), Capability::Image);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.user_message(), "Failed to generate image. Please try again.");
    }

    #[test]
    fn test_validation_message_is_shown() {
        let err = ApiError::generation(
            GenerationError::validation("prompt", "Please enter a prompt."),
            Capability::Video,
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "Please enter a prompt.");
    }

    #[test]
    fn test_not_found() {
        assert_eq!(ApiError::SessionNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::ArtifactNotFound.user_message(), "Artifact not found");
    }
}
