use hayat_types::{
    DocumentRequest, GenerationError, ImagePayload, ImageRequest, Result, VideoRequest,
};
use std::sync::Arc;

use crate::artifacts::ArtifactStore;
use crate::backend::{GeminiBackend, GenerativeBackend, TextStream};
use crate::config::{ClientConfig, PollConfig};
use crate::document;
use crate::session::ConversationSession;
use crate::video::{augment_video_prompt, ProgressStream, VideoPoller};
use crate::watermark;

/// Entry point for all four generation modes.
///
/// Validation happens here, before any backend call. Cloning is cheap and
/// clones share the backend and the artifact store.
pub struct GenerationClient<B: GenerativeBackend = GeminiBackend> {
    backend: Arc<B>,
    artifacts: ArtifactStore,
    poll: PollConfig,
    system_instruction: Arc<str>,
}

impl<B: GenerativeBackend> Clone for GenerationClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            artifacts: self.artifacts.clone(),
            poll: self.poll,
            system_instruction: Arc::clone(&self.system_instruction),
        }
    }
}

impl GenerationClient<GeminiBackend> {
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let poll = config.poll;
        let system_instruction = config.system_instruction.clone();
        let backend = GeminiBackend::new(config)?;
        Ok(Self::with_backend(backend, poll, &system_instruction))
    }
}

impl<B: GenerativeBackend> GenerationClient<B> {
    pub fn with_backend(backend: B, poll: PollConfig, system_instruction: &str) -> Self {
        Self {
            backend: Arc::new(backend),
            artifacts: ArtifactStore::new(),
            poll,
            system_instruction: Arc::from(system_instruction),
        }
    }

    /// Use `artifacts` for downloaded videos instead of a private store.
    pub fn with_artifacts(mut self, artifacts: ArtifactStore) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// New conversation seeded with the greeting turn.
    pub fn start_conversation(&self) -> ConversationSession {
        ConversationSession::new(Arc::clone(&self.system_instruction))
    }

    /// Send one user message and stream the reply.
    ///
    /// On any failure the session's trailing model turn becomes the apology
    /// and the exchange is left out of the backend history.
    pub async fn send_turn(&self, session: &ConversationSession, text: &str) -> Result<TextStream> {
        session.send_turn(Arc::clone(&self.backend), text).await
    }

    /// Generate one image and stamp the watermark on it.
    pub async fn generate_image(&self, request: &ImageRequest) -> Result<ImagePayload> {
        request.validate()?;
        let raw = self
            .backend
            .synthesize_image(request.prompt.trim(), &request.aspect_ratio)
            .await?;

        let payload = tokio::task::spawn_blocking(move || watermark::apply(&raw.data))
            .await
            .map_err(|e| GenerationError::image_processing(format!("watermark task failed: {}", e)))??;

        tracing::info!(aspect_ratio = %request.aspect_ratio, bytes = payload.data.len(), "Image generated");
        Ok(payload)
    }

    /// Generate a single-file HTML app; returns markup without code fences.
    pub async fn generate_document(&self, request: &DocumentRequest) -> Result<String> {
        request.validate()?;
        let prompt = document::build_prompt(request.prompt.trim());
        let raw = self.backend.synthesize_document(&prompt).await?;
        let html = document::strip_code_fence(&raw);
        tracing::info!(chars = html.len(), "App generated");
        Ok(html)
    }

    /// Start a video job. Invalid requests fail here; everything after
    /// submission is reported through the stream.
    pub fn generate_video(&self, request: VideoRequest) -> Result<ProgressStream> {
        request.validate()?;
        let prompt = augment_video_prompt(&request.prompt, &request.aspect_ratio);
        let poller = VideoPoller::new(Arc::clone(&self.backend), self.artifacts.clone(), self.poll);
        Ok(poller.run(prompt, request.image))
    }
}
