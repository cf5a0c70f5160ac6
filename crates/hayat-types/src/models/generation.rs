//! Generation requests and results.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GenerationError, Result};

/// The four things a user can ask the backend for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Chat,
    Image,
    Video,
    Document,
}

impl Capability {
    /// Generic message shown when a backend or processing error reaches the UI.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Chat => crate::models::APOLOGY_TEXT,
            Self::Image => "Failed to generate image. Please try again.",
            Self::Video => "Failed to generate video. Please try again.",
            Self::Document => "Failed to generate the app. Please try again.",
        }
    }

    /// Inline message shown when the prompt is blank.
    pub fn empty_prompt_message(self) -> &'static str {
        match self {
            Self::Chat => "Please enter a message.",
            Self::Image | Self::Video => "Please enter a prompt.",
            Self::Document => "Please describe the app you want to build.",
        }
    }

    /// Reject blank (empty or whitespace-only) prompt text.
    pub fn require_prompt(self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(GenerationError::validation("prompt", self.empty_prompt_message()));
        }
        Ok(())
    }
}

/// Aspect ratio passed straight through to the backend.
///
/// Only the values in [`AspectRatio::SUPPORTED`] are meaningful to the image and
/// video models; this type does not reject others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AspectRatio(String);

impl AspectRatio {
    pub const SQUARE: &'static str = "1:1";
    pub const WIDESCREEN: &'static str = "16:9";
    pub const VERTICAL: &'static str = "9:16";
    pub const LANDSCAPE: &'static str = "4:3";
    pub const PORTRAIT: &'static str = "3:4";

    pub const SUPPORTED: [&'static str; 5] =
        [Self::SQUARE, Self::WIDESCREEN, Self::VERTICAL, Self::LANDSCAPE, Self::PORTRAIT];

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn square() -> Self {
        Self::new(Self::SQUARE)
    }

    pub fn widescreen() -> Self {
        Self::new(Self::WIDESCREEN)
    }

    pub fn vertical() -> Self {
        Self::new(Self::VERTICAL)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(&self.0.as_str())
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::square()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AspectRatio {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Optional still image a video is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ReferenceImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self { mime_type: mime_type.into(), data }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mime_type.starts_with("image/") || self.data.is_empty() {
            return Err(GenerationError::validation(
                "image",
                "Please select a valid image file (e.g., PNG, JPEG, WEBP).",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self { prompt: prompt.into(), aspect_ratio }
    }

    pub fn validate(&self) -> Result<()> {
        Capability::Image.require_prompt(&self.prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub image: Option<ReferenceImage>,
}

impl VideoRequest {
    pub fn new(prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self { prompt: prompt.into(), aspect_ratio, image: None }
    }

    pub fn with_image(mut self, image: ReferenceImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn validate(&self) -> Result<()> {
        Capability::Video.require_prompt(&self.prompt)?;
        match &self.image {
            Some(image) => image.validate(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    pub prompt: String,
}

impl DocumentRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into() }
    }

    pub fn validate(&self) -> Result<()> {
        Capability::Document.require_prompt(&self.prompt)
    }
}

/// Encoded image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self { mime_type: mime_type.into(), data }
    }

    /// `data:` URL the browser can render directly.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, general_purpose::STANDARD.encode(&self.data))
    }
}
