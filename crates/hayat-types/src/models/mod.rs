//! Domain models.

pub mod conversation;
pub mod generation;
pub mod progress;

pub use conversation::{Conversation, Role, Turn, APOLOGY_TEXT, GREETING_TEXT};
pub use generation::{
    AspectRatio, Capability, DocumentRequest, ImagePayload, ImageRequest, ReferenceImage,
    VideoRequest,
};
pub use progress::{ProgressEvent, VideoStatus};
