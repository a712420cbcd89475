//! Character name persistence.
//!
//! The processor only knows object ids; display names come from roster and
//! spawn records, which are written back to a store so later encounters can
//! name players that never appear in a roster.

use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use tokio::sync::RwLock;

use super::error::NameStoreError;
use crate::combat_log::ActorId;

/// Asynchronous lookup/persist interface for character names.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Look up the stored name of a character.
    async fn get_character(&self, id: ActorId) -> Result<String, NameStoreError>;

    /// Persist a character name. Fire-and-forget: implementations must not
    /// block the caller on I/O.
    fn save_character(&self, id: ActorId, name: &str);
}

/// In-memory store, shared by cloning.
#[derive(Clone, Default)]
pub struct MemoryCharacterStore {
    chars: Arc<RwLock<HashMap<ActorId, String>>>,
}

impl MemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_characters<I, S>(chars: I) -> Self
    where
        I: IntoIterator<Item = (ActorId, S)>,
        S: Into<String>,
    {
        let map = chars
            .into_iter()
            .map(|(id, name)| (id, name.into()))
            .collect();
        Self {
            chars: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn len(&self) -> usize {
        self.chars.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chars.read().await.is_empty()
    }
}

#[async_trait]
impl CharacterStore for MemoryCharacterStore {
    async fn get_character(&self, id: ActorId) -> Result<String, NameStoreError> {
        self.chars
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(NameStoreError::NotFound { id })
    }

    fn save_character(&self, id: ActorId, name: &str) {
        // Try the fast path first; fall back to a background write under contention.
        if let Ok(mut chars) = self.chars.try_write() {
            chars.insert(id, name.to_string());
            return;
        }
        let chars = Arc::clone(&self.chars);
        let name = name.to_string();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    chars.write().await.insert(id, name);
                });
            }
            Err(_) => {
                tracing::warn!(actor = id, "Dropping character name save: store busy and no runtime");
            }
        }
    }
}
