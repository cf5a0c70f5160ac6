//! Video generation progress events.

use serde::{Deserialize, Serialize};

/// Observable states of a video generation run.
///
/// Submission has no event of its own; the first event is emitted once the
/// backend has accepted the job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoStatus {
    Generating,
    Polling,
    Fetching,
    Completed,
}

impl VideoStatus {
    /// Fixed progress percentage reported for this state.
    pub fn progress(self) -> u8 {
        match self {
            Self::Generating => 25,
            Self::Polling => 50,
            Self::Fetching => 75,
            Self::Completed => 100,
        }
    }
}

/// Transient status record; consumed once and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressEvent {
    pub status: VideoStatus,
    pub progress: u8,
    /// Locally addressable video, present only on `COMPLETED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ProgressEvent {
    fn at(status: VideoStatus) -> Self {
        Self { status, progress: status.progress(), url: None }
    }

    pub fn generating() -> Self {
        Self::at(VideoStatus::Generating)
    }

    pub fn polling() -> Self {
        Self::at(VideoStatus::Polling)
    }

    pub fn fetching() -> Self {
        Self::at(VideoStatus::Fetching)
    }

    pub fn completed(url: impl Into<String>) -> Self {
        Self { url: Some(url.into()), ..Self::at(VideoStatus::Completed) }
    }
}
