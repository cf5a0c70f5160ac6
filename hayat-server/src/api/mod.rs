//! API Routes
//!
//! JSON endpoints for one-shot generation, SSE endpoints for streamed work.

mod apps;
mod artifacts;
mod chat;
mod error;
mod images;
mod videos;

#[cfg(test)]
mod images_tests;
#[cfg(test)]
mod videos_tests;

pub use error::ApiError;

use axum::{
    http::StatusCode,
    response::{sse::Event, IntoResponse, Json},
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Chat
        .route("/chat/sessions", post(chat::create_session))
        .route(
            "/chat/sessions/:id",
            get(chat::get_session).delete(chat::delete_session),
        )
        .route("/chat/sessions/:id/messages", post(chat::send_message))
        // Images
        .route("/images", post(images::generate_image))
        // Videos
        .route("/videos", post(videos::generate_video))
        .route(
            "/artifacts/:id",
            get(artifacts::get_artifact).delete(artifacts::delete_artifact),
        )
        // Apps
        .route("/apps", post(apps::generate_app))
        // API fallback: return 404 for unknown API endpoints
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"})))
}

/// Named SSE event carrying a JSON payload.
pub(crate) fn json_event(name: &str, payload: serde_json::Value) -> Event {
    Event::default().event(name).data(payload.to_string())
}
