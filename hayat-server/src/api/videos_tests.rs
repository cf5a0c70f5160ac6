use axum::http::StatusCode;
use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_helpers::{sse_events, test_server};

const SUBMIT_PATH: &str = "/v1beta/models/veo-2.0-generate-001:predictLongRunning";
const OPERATION: &str = "models/veo-2.0-generate-001/operations/op-7";

async fn mount_operation(backend: &MockServer, with_video: bool) {
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OPERATION})))
        .mount(backend)
        .await;

    let response = if with_video {
        json!({"generateVideoResponse": {"generatedSamples": [{"video": {
            "uri": format!("{}/v1beta/files/v7:download?alt=media", backend.uri())
        }}]}})
    } else {
        json!({"generateVideoResponse": {"raiMediaFilteredReasons": ["unsafe content"]}})
    };

    Mock::given(method("GET"))
        .and(path(format!("/v1beta/{}", OPERATION)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": OPERATION, "done": true, "response": response})),
        )
        .mount(backend)
        .await;
}

#[tokio::test]
async fn test_video_progress_then_artifact() {
    let (server, backend, state) = test_server().await;
    mount_operation(&backend, true).await;
    Mock::given(method("GET"))
        .and(path("/v1beta/files/v7:download"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4-bytes".to_vec()))
        .mount(&backend)
        .await;

    let response = server
        .post("/api/videos")
        .json(&json!({"prompt": "Waves at dusk", "aspect_ratio": "9:16"}))
        .await;
    response.assert_status_ok();

    let events = sse_events(&response.text());
    let progress: Vec<(String, i64)> = events
        .iter()
        .map(|(name, data)| (name.clone(), data["progress"].as_i64().unwrap_or(-1)))
        .collect();
    assert_eq!(
        progress,
        vec![
            ("progress".to_string(), 25),
            ("progress".to_string(), 50),
            ("progress".to_string(), 75),
            ("progress".to_string(), 100),
        ]
    );
    assert_eq!(events[0].1["status"], "GENERATING");

    let url = events[3].1["url"].as_str().unwrap_or_default().to_string();
    assert!(url.starts_with("/api/artifacts/"));
    assert_eq!(state.artifacts().len(), 1);

    let artifact = server.get(&url).await;
    artifact.assert_status_ok();
    assert_eq!(artifact.header("content-type"), "video/mp4");
    assert_eq!(artifact.as_bytes().as_ref(), b"mp4-bytes");

    server.delete(&url).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&url).await.assert_status_not_found();
}

#[tokio::test]
async fn test_prompt_is_augmented_before_submission() {
    let (server, backend, _state) = test_server().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(body_partial_json(json!({"instances": [{
            "prompt": "A lighthouse. A small, subtle watermark text 'Hayat Ai' must be present in the lower-left corner of the video."
        }]})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&backend)
        .await;

    let response = server
        .post("/api/videos")
        .json(&json!({"prompt": "A lighthouse", "aspect_ratio": "4:3"}))
        .await;
    let events = sse_events(&response.text());
    assert_eq!(
        events,
        vec![(
            "error".to_string(),
            json!({"message": "Failed to generate video. Please try again.", "progress": 0})
        )]
    );
}

#[tokio::test]
async fn test_missing_video_link_ends_with_error() {
    let (server, backend, state) = test_server().await;
    mount_operation(&backend, false).await;

    let response = server.post("/api/videos").json(&json!({"prompt": "Waves"})).await;
    let names: Vec<String> = sse_events(&response.text()).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["progress", "progress", "progress", "error"]);
    assert!(state.artifacts().is_empty());
}

#[tokio::test]
async fn test_reference_image_is_forwarded() {
    let (server, backend, _state) = test_server().await;
    let image = general_purpose::STANDARD.encode(b"\x89PNG fake");
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(body_partial_json(json!({"instances": [{
            "image": {"bytesBase64Encoded": image, "mimeType": "image/png"}
        }]})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&backend)
        .await;

    let _ = server
        .post("/api/videos")
        .json(&json!({
            "prompt": "Animate this",
            "image": {"mime_type": "image/png", "data": format!("data:image/png;base64,{}", image)}
        }))
        .await;
}

#[tokio::test]
async fn test_invalid_requests_are_rejected() {
    let (server, backend, _state) = test_server().await;

    let response = server.post("/api/videos").json(&json!({"prompt": ""})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Please enter a prompt."}));

    let response = server
        .post("/api/videos")
        .json(&json!({"prompt": "x", "image": {"mime_type": "application/pdf", "data": "AAAA"}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Please select a valid image file (e.g., PNG, JPEG, WEBP)."}));

    let response = server
        .post("/api/videos")
        .json(&json!({"prompt": "x", "image": {"mime_type": "image/png", "data": "%%%"}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert!(backend.received_requests().await.unwrap_or_default().is_empty());
}
