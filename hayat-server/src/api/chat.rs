use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::{Stream, StreamExt};
use hayat_types::{Capability, Conversation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

use super::{json_event, ApiError};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub transcript: Conversation,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let session = state.create_session();
    let transcript = session.transcript().await;
    (StatusCode::CREATED, Json(SessionResponse { id: session.id(), transcript }))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.session(&id).ok_or(ApiError::SessionNotFound)?;
    Ok(Json(SessionResponse { id, transcript: session.transcript().await }))
}

pub async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.remove_session(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Stream the reply as `chunk` events, then `done`.
///
/// Blank messages are rejected with 400. Any backend failure, before or during
/// the reply, ends the stream with a single `error` event carrying the apology.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let session = state.session(&id).ok_or(ApiError::SessionNotFound)?;

    let opened = match state.client().send_turn(&session, &body.text).await {
        Err(e) if e.is_client_error() => return Err(ApiError::generation(e, Capability::Chat)),
        other => other,
    };

    let events = async_stream::stream! {
        let mut chunks = match opened {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::warn!(session = %id, "Chat turn failed: {}", e);
                yield Ok::<Event, Infallible>(error_event(&e));
                return;
            }
        };

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(text) => yield Ok(json_event("chunk", serde_json::json!({ "text": text }))),
                Err(e) => {
                    tracing::warn!(session = %id, "Chat stream failed: {}", e);
                    yield Ok(error_event(&e));
                    return;
                }
            }
        }

        yield Ok(json_event("done", serde_json::json!({})));
    };

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn error_event(error: &hayat_types::GenerationError) -> Event {
    json_event("error", serde_json::json!({ "message": error.user_message(Capability::Chat) }))
}
