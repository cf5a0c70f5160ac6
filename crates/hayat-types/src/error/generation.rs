//! Generation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Capability;

/// Errors that can occur while producing a chat turn, image, video, or document.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum GenerationError {
    /// Request rejected before it reached the backend
    #[error("Invalid {field}: {message}")]
    RequestValidation {
        /// Offending request field
        field: String,
        /// Inline message shown to the user
        message: String,
    },

    /// Network call to the generative backend failed (transport, non-2xx, bad body)
    #[error("Backend call failed{}: {message}", status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    BackendCall {
        /// HTTP status, when the backend answered at all
        status: Option<u16>,
        /// Backend or transport error message
        message: String,
    },

    /// Operation finished but carried no usable video reference
    #[error("Video generation failed or returned no link (operation {operation})")]
    MissingArtifact {
        /// Backend operation name
        operation: String,
    },

    /// Watermarking failed (decode, surface, encode)
    #[error("Image processing failed: {message}")]
    ImageProcessing {
        /// Description of the failure
        message: String,
    },

    /// Operation still running after the configured poll cap
    #[error("Operation {operation} still running after {attempts} polls")]
    PollTimeout {
        /// Backend operation name
        operation: String,
        /// Number of status polls performed
        attempts: u32,
    },
}

impl GenerationError {
    pub fn validation(field: &str, message: &str) -> Self {
        Self::RequestValidation { field: field.to_string(), message: message.to_string() }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendCall { status: None, message: message.into() }
    }

    pub fn image_processing(message: impl Into<String>) -> Self {
        Self::ImageProcessing { message: message.into() }
    }

    /// Check if this error was caused by the caller rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::RequestValidation { .. })
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::RequestValidation { .. } => 400,
            Self::BackendCall { .. } | Self::MissingArtifact { .. } => 502,
            Self::PollTimeout { .. } => 504,
            Self::ImageProcessing { .. } => 500,
        }
    }

    /// Message suitable for the UI.
    ///
    /// Validation errors are shown inline as-is; everything else collapses to
    /// the capability's generic failure message.
    pub fn user_message(&self, capability: Capability) -> String {
        match self {
            Self::RequestValidation { message, .. } => message.clone(),
            _ => capability.failure_message().to_string(),
        }
    }
}
