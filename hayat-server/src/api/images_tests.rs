use axum::http::StatusCode;
use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use super::images::GenerateImageResponse;
use crate::test_helpers::test_server;

const IMAGE_PATH: &str = "/v1beta/models/imagen-4.0-generate-001:predict";

fn jpeg_base64() -> String {
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(200, 200, Rgb([0, 0, 0]));
    let mut out = Vec::new();
    if let Err(e) = JpegEncoder::new_with_quality(&mut out, 90).encode_image(&buffer) {
        panic!("jpeg encode failed: {e}");
    }
    general_purpose::STANDARD.encode(out)
}

#[tokio::test]
async fn test_generate_image_returns_data_url() {
    let (server, backend, _state) = test_server().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({"parameters": {"aspectRatio": "16:9"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"bytesBase64Encoded": jpeg_base64(), "mimeType": "image/jpeg"}]
        })))
        .expect(1)
        .mount(&backend)
        .await;

    let response = server
        .post("/api/images")
        .json(&json!({"prompt": "A neon koi", "aspect_ratio": "16:9"}))
        .await;
    response.assert_status_ok();

    let body: GenerateImageResponse = response.json();
    assert_eq!(body.mime_type, "image/jpeg");
    assert!(body.data_url.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn test_aspect_ratio_defaults_to_square() {
    let (server, backend, _state) = test_server().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({"parameters": {"aspectRatio": "1:1", "sampleCount": 1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"bytesBase64Encoded": jpeg_base64()}]
        })))
        .expect(1)
        .mount(&backend)
        .await;

    server.post("/api/images").json(&json!({"prompt": "A koi"})).await.assert_status_ok();
}

#[tokio::test]
async fn test_unlisted_aspect_ratio_passes_through() {
    let (server, backend, _state) = test_server().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({"parameters": {"aspectRatio": "21:9"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"bytesBase64Encoded": jpeg_base64()}]
        })))
        .expect(1)
        .mount(&backend)
        .await;

    server
        .post("/api/images")
        .json(&json!({"prompt": "A koi", "aspect_ratio": "21:9"}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_empty_prompt_is_rejected_without_backend_call() {
    let (server, backend, _state) = test_server().await;

    let response = server.post("/api/images").json(&json!({"prompt": ""})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Please enter a prompt."}));
    assert!(backend.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_backend_failure_is_generic() {
    let (server, backend, _state) = test_server().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "Prompt rejected by safety filter", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&backend)
        .await;

    let response = server.post("/api/images").json(&json!({"prompt": "x"})).await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_json(&json!({"error": "Failed to generate image. Please try again."}));
}

#[tokio::test]
async fn test_undecodable_image_is_server_error() {
    let (server, backend, _state) = test_server().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"bytesBase64Encoded": general_purpose::STANDARD.encode(b"not a jpeg")}]
        })))
        .mount(&backend)
        .await;

    let response = server.post("/api/images").json(&json!({"prompt": "x"})).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"error": "Failed to generate image. Please try again."}));
}
