//! Scripted backend for unit tests.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use bytes::Bytes;
use hayat_types::protocol::gemini::{
    GenerateVideoResponse, GeneratedSample, VideoOperationResponse, VideoReference,
};
use hayat_types::protocol::VideoOperation;
use hayat_types::{
    AspectRatio, GenerationError, ImagePayload, ReferenceImage, Result, Turn,
};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::backend::{GenerativeBackend, TextStream};

#[derive(Default)]
pub(crate) struct FakeBackend {
    turns: Mutex<VecDeque<Result<Vec<Result<String>>>>>,
    histories: Mutex<Vec<Vec<Turn>>>,
    image: Mutex<Option<Result<ImagePayload>>>,
    document: Mutex<Option<Result<String>>>,
    operations: Mutex<VecDeque<Result<VideoOperation>>>,
    prompts: Mutex<Vec<String>>,
    download: Mutex<Option<Result<Bytes>>>,
    calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next chat turn streams these items.
    pub fn with_turn(self, chunks: Vec<Result<String>>) -> Self {
        self.turns.lock().unwrap().push_back(Ok(chunks));
        self
    }

    /// Next chat turn fails before any chunk.
    pub fn with_failed_turn(self, error: GenerationError) -> Self {
        self.turns.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_image(self, result: Result<ImagePayload>) -> Self {
        *self.image.lock().unwrap() = Some(result);
        self
    }

    pub fn with_document(self, result: Result<String>) -> Self {
        *self.document.lock().unwrap() = Some(result);
        self
    }

    /// First entry answers the submission, the rest answer successive polls.
    pub fn with_operations(self, operations: Vec<Result<VideoOperation>>) -> Self {
        self.operations.lock().unwrap().extend(operations);
        self
    }

    pub fn with_download(self, result: Result<Bytes>) -> Self {
        *self.download.lock().unwrap() = Some(result);
        self
    }

    /// Total backend calls of any kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// History passed to each `stream_turn`, in call order.
    pub fn histories(&self) -> Vec<Vec<Turn>> {
        self.histories.lock().unwrap().clone()
    }

    /// Prompts passed to image, document and video calls, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn record(&self, prompt: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
    }

    fn next_operation(&self) -> Result<VideoOperation> {
        self.operations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::backend("no scripted operation")))
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn stream_turn(
        &self,
        _system_instruction: &str,
        history: &[Turn],
        _text: &str,
    ) -> Result<TextStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.histories.lock().unwrap().push(history.to_vec());
        let chunks = self
            .turns
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::backend("no scripted turn")))?;
        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    async fn synthesize_image(
        &self,
        prompt: &str,
        _aspect_ratio: &AspectRatio,
    ) -> Result<ImagePayload> {
        self.record(prompt);
        self.image
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(GenerationError::backend("no scripted image")))
    }

    async fn synthesize_document(&self, prompt: &str) -> Result<String> {
        self.record(prompt);
        self.document
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(GenerationError::backend("no scripted document")))
    }

    async fn submit_video(
        &self,
        prompt: &str,
        _image: Option<&ReferenceImage>,
    ) -> Result<VideoOperation> {
        self.record(prompt);
        self.next_operation()
    }

    async fn poll_operation(&self, _operation: &VideoOperation) -> Result<VideoOperation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.next_operation()
    }

    async fn download_video(&self, _uri: &str) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.download
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(GenerationError::backend("no scripted download")))
    }
}

pub(crate) fn pending_operation(name: &str) -> VideoOperation {
    VideoOperation { name: name.to_string(), done: false, ..Default::default() }
}

pub(crate) fn finished_operation(name: &str, uri: Option<&str>) -> VideoOperation {
    let generated_samples = uri
        .map(|uri| {
            vec![GeneratedSample { video: Some(VideoReference { uri: Some(uri.to_string()) }) }]
        })
        .unwrap_or_default();
    VideoOperation {
        name: name.to_string(),
        done: true,
        response: Some(VideoOperationResponse {
            generate_video_response: Some(GenerateVideoResponse {
                generated_samples,
                rai_media_filtered_reasons: Vec::new(),
            }),
        }),
        error: None,
    }
}

/// Solid-colour JPEG of the given size.
pub(crate) fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(width, height, Rgb([20, 40, 80]));
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 90).encode_image(&buffer).unwrap();
    out
}
