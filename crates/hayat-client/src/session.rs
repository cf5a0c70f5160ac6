//! Conversation sessions.

use futures::StreamExt;
use hayat_types::{Capability, Conversation, GenerationError, Result, Turn};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::{GenerativeBackend, TextStream};

#[derive(Debug)]
struct SessionState {
    /// What the user sees, greeting and apologies included.
    transcript: Conversation,
    /// Completed user/model exchanges replayed to the backend.
    history: Vec<Turn>,
}

/// One chat conversation with the backend.
///
/// Turns are serialized: a second `send_turn` waits until the previous reply
/// stream has finished or been dropped. The state lock is only taken for each
/// individual update, so `transcript()` never waits on a live reply and sees
/// the partial model turn. Clones refer to the same conversation.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: Uuid,
    system_instruction: Arc<str>,
    turn: Arc<Mutex<()>>,
    state: Arc<Mutex<SessionState>>,
}

impl ConversationSession {
    pub(crate) fn new(system_instruction: Arc<str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            system_instruction,
            turn: Arc::new(Mutex::new(())),
            state: Arc::new(Mutex::new(SessionState {
                transcript: Conversation::seeded(),
                history: Vec::new(),
            })),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Snapshot of the visible transcript.
    pub async fn transcript(&self) -> Conversation {
        self.state.lock().await.transcript.clone()
    }

    /// Number of exchanges the backend will see as context.
    pub async fn history_len(&self) -> usize {
        self.state.lock().await.history.len()
    }

    /// Send one user turn and stream the model's reply.
    ///
    /// The exchange enters the backend history only once the reply stream is
    /// drained. A stream dropped part-way leaves its partial text in the
    /// transcript and nothing in the history, so the next turn is sent without
    /// the abandoned exchange as context.
    pub(crate) async fn send_turn<B: GenerativeBackend>(
        &self,
        backend: Arc<B>,
        text: &str,
    ) -> Result<TextStream> {
        Capability::Chat.require_prompt(text)?;
        let text = text.trim().to_string();

        let turn = self.turn.clone().lock_owned().await;
        let history = {
            let mut state = self.state.lock().await;
            state.transcript.push_user(text.clone());
            state.transcript.begin_model_turn();
            state.history.clone()
        };

        let opened = backend
            .stream_turn(&self.system_instruction, &history, &text)
            .await;
        let mut chunks = match opened {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::warn!(session = %self.id, "Chat turn failed to start: {}", e);
                self.state.lock().await.transcript.fail_model_turn();
                return Err(e);
            }
        };

        let session = self.id;
        let state = self.state.clone();
        let stream = async_stream::stream! {
            let _turn = turn;
            let mut reply = String::new();
            while let Some(chunk) = chunks.next().await {
                match chunk {
                    Ok(chunk) => {
                        state.lock().await.transcript.append_to_model_turn(&chunk);
                        reply.push_str(&chunk);
                        yield Ok::<String, GenerationError>(chunk);
                    }
                    Err(e) => {
                        tracing::warn!(%session, "Chat stream failed: {}", e);
                        state.lock().await.transcript.fail_model_turn();
                        yield Err(e);
                        return;
                    }
                }
            }
            let mut state = state.lock().await;
            state.history.push(Turn::user(text));
            state.history.push(Turn::model(reply));
            tracing::debug!(%session, turns = state.history.len(), "Chat turn complete");
        };

        Ok(Box::pin(stream))
    }
}
