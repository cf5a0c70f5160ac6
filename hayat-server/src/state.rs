//! Application State
//!
//! Holds the generation client and the live chat sessions.

use dashmap::DashMap;
use hayat_client::{ArtifactStore, ConversationSession, GenerationClient};
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub client: GenerationClient,
    /// Live chat sessions. Entries are removed only by `DELETE /api/chat/sessions/:id`;
    /// there is no idle sweep, so a client that never deletes its sessions grows this
    /// map for the life of the process. Stored videos in the artifact store behave
    /// the same way until revoked.
    pub sessions: DashMap<Uuid, ConversationSession>,
}

impl AppState {
    pub fn new(client: GenerationClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { client, sessions: DashMap::new() }),
        }
    }

    pub fn client(&self) -> &GenerationClient {
        &self.inner.client
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        self.inner.client.artifacts()
    }

    pub fn create_session(&self) -> ConversationSession {
        let session = self.inner.client.start_conversation();
        self.inner.sessions.insert(session.id(), session.clone());
        tracing::debug!(session = %session.id(), "Chat session created");
        session
    }

    pub fn session(&self, id: &Uuid) -> Option<ConversationSession> {
        self.inner.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove_session(&self, id: &Uuid) -> bool {
        self.inner.sessions.remove(id).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.inner.sessions.len()
    }
}
