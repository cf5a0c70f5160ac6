//! # Hayat Types
//!
//! Core types, models, and error definitions for Hayat Ai.
//!
//! - **`error`** - Typed error taxonomy for generation and startup configuration
//! - **`models`** - Domain models (Conversation, generation requests, progress events)
//! - **`protocol`** - Gemini REST request/response schema
//!
//! ## Architecture Role
//!
//! ```text
//!          hayat-types (this crate)
//!                 │
//!                 ▼
//!           hayat-client
//!                 │
//!                 ▼
//!           hayat-server
//! ```
//!
//! Domain types are serializable via serde so the HTTP facade can hand them to
//! the browser without an extra mapping layer.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ConfigError, GenerationError, Result};

pub use models::{
    AspectRatio, Capability, Conversation, DocumentRequest, ImagePayload, ImageRequest,
    ProgressEvent, ReferenceImage, Role, Turn, VideoRequest, VideoStatus,
};
