//! In-process store for downloaded media.
//!
//! Finished videos are kept here and handed out as locally addressable URLs.
//! Entries live until revoked; nothing evicts them automatically.

use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Route prefix artifact URLs are minted under.
pub const DEFAULT_PREFIX: &str = "/api/artifacts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub mime_type: String,
    pub data: Bytes,
}

/// Identifier and URL of a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHandle {
    pub id: Uuid,
    pub url: String,
}

/// Cheaply cloneable; clones share the same entries.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    entries: Arc<DashMap<Uuid, Artifact>>,
    url_prefix: Arc<str>,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            url_prefix: Arc::from(prefix.trim_end_matches('/')),
        }
    }

    pub fn insert(&self, mime_type: impl Into<String>, data: Bytes) -> ArtifactHandle {
        let id = Uuid::new_v4();
        let mime_type = mime_type.into();
        tracing::debug!(%id, %mime_type, bytes = data.len(), "Stored artifact");
        self.entries.insert(id, Artifact { mime_type, data });
        ArtifactHandle { id, url: self.url_for(id) }
    }

    pub fn get(&self, id: &Uuid) -> Option<Artifact> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Release an artifact. Returns whether it existed.
    pub fn revoke(&self, id: &Uuid) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn url_for(&self, id: Uuid) -> String {
        format!("{}/{}", self.url_prefix, id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
