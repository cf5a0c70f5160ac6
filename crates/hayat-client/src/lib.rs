#![doc = include_str!("../README.md")]

mod artifacts;
mod backend;
mod client;
mod config;
pub mod document;
mod session;
pub mod video;
pub mod watermark;

#[cfg(test)]
mod test_support;

pub use artifacts::{Artifact, ArtifactHandle, ArtifactStore};
pub use backend::{GeminiBackend, GenerativeBackend, TextStream};
pub use client::GenerationClient;
pub use config::{ClientConfig, ModelConfig, PollConfig, API_KEY_ENV, SYSTEM_INSTRUCTION};
pub use session::ConversationSession;
pub use video::{ProgressStream, VideoPoller};

pub use hayat_types::{ConfigError, GenerationError};
