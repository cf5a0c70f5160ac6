//! Seam between the generation client and the remote generative service.

mod gemini;

pub use gemini::GeminiBackend;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use hayat_types::protocol::VideoOperation;
use hayat_types::{AspectRatio, ImagePayload, ReferenceImage, Result, Turn};
use std::pin::Pin;

/// Incremental text fragments of one model reply.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Remote generative service.
///
/// Every call is a single attempt; retries and fallbacks are the caller's business.
#[async_trait]
pub trait GenerativeBackend: Send + Sync + 'static {
    /// Start a streamed reply to `text`, given the prior successful exchanges.
    async fn stream_turn(
        &self,
        system_instruction: &str,
        history: &[Turn],
        text: &str,
    ) -> Result<TextStream>;

    /// One encoded image for `prompt` (not yet watermarked).
    async fn synthesize_image(&self, prompt: &str, aspect_ratio: &AspectRatio)
        -> Result<ImagePayload>;

    /// Raw, non-streamed model text for `prompt`.
    async fn synthesize_document(&self, prompt: &str) -> Result<String>;

    /// Submit a long-running video job.
    async fn submit_video(
        &self,
        prompt: &str,
        image: Option<&ReferenceImage>,
    ) -> Result<VideoOperation>;

    /// Refresh an operation's state.
    async fn poll_operation(&self, operation: &VideoOperation) -> Result<VideoOperation>;

    /// Fetch the finished video bytes.
    async fn download_video(&self, uri: &str) -> Result<Bytes>;
}
