use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use hayat_types::protocol::gemini::{
    ApiErrorEnvelope, GeminiContent, GenerateContentRequest, GenerateContentResponse,
    ImagenInstance, ImagenParameters, ImagenPredictRequest, ImagenPredictResponse, VeoImage,
    VeoInstance, VeoParameters, VeoPredictRequest, VideoOperation,
};
use hayat_types::{AspectRatio, GenerationError, ImagePayload, ReferenceImage, Result, Turn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::{GenerativeBackend, TextStream};
use crate::config::ClientConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";
const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// [`GenerativeBackend`] over the Gemini REST API.
pub struct GeminiBackend {
    http: Client,
    config: ClientConfig,
}

impl GeminiBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(transport_error)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.config.base_url, model, method)
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(resp).await
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn stream_turn(
        &self,
        system_instruction: &str,
        history: &[Turn],
        text: &str,
    ) -> Result<TextStream> {
        let mut contents: Vec<GeminiContent> = history.iter().map(GeminiContent::from).collect();
        contents.push(GeminiContent::user(text));
        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(GeminiContent::system(system_instruction)),
        };

        let url = format!(
            "{}?alt=sse",
            self.model_url(&self.config.models.chat, "streamGenerateContent")
        );
        tracing::debug!(turns = history.len(), "Opening chat stream");

        let resp = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let mut events = resp.bytes_stream().eventsource();
        let stream = async_stream::stream! {
            while let Some(event) = events.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!("Chat stream interrupted: {}", e);
                        yield Err(GenerationError::backend(format!("SSE stream error: {}", e)));
                        return;
                    }
                };

                let data = event.data.trim();
                if data.is_empty() || data == "[DONE]" {
                    continue;
                }

                let frame: GenerateContentResponse = match serde_json::from_str(data) {
                    Ok(frame) => frame,
                    Err(e) => {
                        yield Err(GenerationError::backend(format!("SSE parsing error: {}", e)));
                        return;
                    }
                };

                if let Some(reason) = frame.block_reason() {
                    yield Err(GenerationError::backend(format!("Prompt blocked: {}", reason)));
                    return;
                }

                let text = frame.text();
                if !text.is_empty() {
                    yield Ok::<String, GenerationError>(text);
                }
            }
        };

        Ok(Box::pin(stream))
    }

    async fn synthesize_image(
        &self,
        prompt: &str,
        aspect_ratio: &AspectRatio,
    ) -> Result<ImagePayload> {
        let request = ImagenPredictRequest {
            instances: vec![ImagenInstance { prompt: prompt.to_string() }],
            parameters: ImagenParameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.to_string(),
                output_mime_type: IMAGE_MIME_TYPE.to_string(),
            },
        };
        let url = self.model_url(&self.config.models.image, "predict");
        let response: ImagenPredictResponse = self.post_json(&url, &request).await?;

        let prediction = response
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.is_some())
            .ok_or_else(|| GenerationError::backend("Image model returned no image"))?;

        let encoded = prediction.bytes_base64_encoded.unwrap_or_default();
        let data = general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| GenerationError::backend(format!("Invalid image payload: {}", e)))?;

        Ok(ImagePayload::new(
            prediction.mime_type.unwrap_or_else(|| IMAGE_MIME_TYPE.to_string()),
            data,
        ))
    }

    async fn synthesize_document(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![GeminiContent::user(prompt)],
            system_instruction: None,
        };
        let url = self.model_url(&self.config.models.document, "generateContent");
        let response: GenerateContentResponse = self.post_json(&url, &request).await?;

        if let Some(reason) = response.block_reason() {
            return Err(GenerationError::backend(format!("Prompt blocked: {}", reason)));
        }
        Ok(response.text())
    }

    async fn submit_video(
        &self,
        prompt: &str,
        image: Option<&ReferenceImage>,
    ) -> Result<VideoOperation> {
        let request = VeoPredictRequest {
            instances: vec![VeoInstance {
                prompt: prompt.to_string(),
                image: image.map(|image| VeoImage {
                    bytes_base64_encoded: general_purpose::STANDARD.encode(&image.data),
                    mime_type: image.mime_type.clone(),
                }),
            }],
            parameters: VeoParameters { sample_count: 1 },
        };
        let url = self.model_url(&self.config.models.video, "predictLongRunning");
        let operation: VideoOperation = self.post_json(&url, &request).await?;
        tracing::info!(operation = %operation.name, "Video job submitted");
        Ok(operation)
    }

    async fn poll_operation(&self, operation: &VideoOperation) -> Result<VideoOperation> {
        let url = format!("{}/{}", self.config.base_url, operation.name);
        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(resp).await
    }

    async fn download_video(&self, uri: &str) -> Result<Bytes> {
        let mut url = url::Url::parse(uri)
            .map_err(|e| GenerationError::backend(format!("Invalid video URI: {}", e)))?;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);

        let resp = self.http.get(url).send().await.map_err(transport_error)?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        resp.bytes().await.map_err(transport_error)
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }
    let status = resp.status().as_u16();
    resp.json().await.map_err(|e| GenerationError::BackendCall {
        status: Some(status),
        message: format!("Invalid response body: {}", e),
    })
}

async fn error_from_response(resp: Response) -> GenerationError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body,
    };
    tracing::warn!(status, "Gemini request failed: {}", message);
    GenerationError::BackendCall { status: Some(status), message }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    GenerationError::BackendCall {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}
