use futures::Stream;
use hayat_types::protocol::VideoOperation;
use hayat_types::{GenerationError, ProgressEvent, ReferenceImage, Result};
use std::pin::Pin;
use std::sync::Arc;

use crate::artifacts::ArtifactStore;
use crate::backend::GenerativeBackend;
use crate::config::PollConfig;

const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Progress events of one video run. Ends after `COMPLETED` or the first error.
pub type ProgressStream = Pin<Box<dyn Stream<Item = Result<ProgressEvent>> + Send>>;

/// Drives one long-running video operation to completion.
///
/// Nothing happens until the returned stream is polled, and dropping the
/// stream stops polling. The remote job is not cancelled.
pub struct VideoPoller<B: GenerativeBackend> {
    backend: Arc<B>,
    artifacts: ArtifactStore,
    poll: PollConfig,
}

impl<B: GenerativeBackend> VideoPoller<B> {
    pub fn new(backend: Arc<B>, artifacts: ArtifactStore, poll: PollConfig) -> Self {
        Self { backend, artifacts, poll }
    }

    /// Submit `prompt` (already augmented) and report progress until the video is stored.
    pub fn run(self, prompt: String, image: Option<ReferenceImage>) -> ProgressStream {
        let Self { backend, artifacts, poll } = self;

        let stream = async_stream::stream! {
            let mut operation: VideoOperation = match backend.submit_video(&prompt, image.as_ref()).await {
                Ok(operation) => operation,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            yield Ok::<ProgressEvent, GenerationError>(ProgressEvent::generating());

            let mut attempts: u32 = 0;
            while !operation.done {
                if let Some(max) = poll.max_attempts {
                    if attempts >= max {
                        tracing::warn!(operation = %operation.name, attempts, "Giving up on video operation");
                        yield Err(GenerationError::PollTimeout {
                            operation: operation.name.clone(),
                            attempts,
                        });
                        return;
                    }
                }

                tokio::time::sleep(poll.interval()).await;
                yield Ok(ProgressEvent::polling());

                attempts += 1;
                operation = match backend.poll_operation(&operation).await {
                    Ok(next) => next,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };
                tracing::debug!(operation = %operation.name, attempts, done = operation.done, "Polled video operation");
            }

            yield Ok(ProgressEvent::fetching());

            if let Some(error) = &operation.error {
                let message = error.message.clone().unwrap_or_else(|| "Video operation failed".to_string());
                yield Err(GenerationError::BackendCall { status: None, message });
                return;
            }

            let uri = match operation.video_uri() {
                Some(uri) => uri.to_string(),
                None => {
                    let reasons = operation.filtered_reasons();
                    if !reasons.is_empty() {
                        tracing::warn!(operation = %operation.name, ?reasons, "Video filtered by backend");
                    }
                    yield Err(GenerationError::MissingArtifact { operation: operation.name.clone() });
                    return;
                }
            };

            let data = match backend.download_video(&uri).await {
                Ok(data) => data,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let handle = artifacts.insert(VIDEO_MIME_TYPE, data);
            tracing::info!(operation = %operation.name, artifact = %handle.id, polls = attempts, "Video ready");
            yield Ok(ProgressEvent::completed(handle.url));
        };

        Box::pin(stream)
    }
}
