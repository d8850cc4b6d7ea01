use super::error::PersistenceError;
use super::model::HistoryEntry;
use super::{HISTORY_CAPACITY, HISTORY_STORAGE_KEY};
use crate::domain::audio::{AudioContainerEncoder, AudioDecodeError, PlayableHandle};
use crate::infrastructure::platform::PersistentStorage;
use std::sync::Arc;

/// Bounded, newest-first cache of past sessions, written through to durable
/// storage on every mutation.
///
/// Persistence failures never escape: they are logged and the in-memory
/// state is kept as the last known good.
pub struct SessionHistoryStore {
    entries: Vec<HistoryEntry>,
    storage: Arc<dyn PersistentStorage>,
    encoder: Arc<AudioContainerEncoder>,
}

impl SessionHistoryStore {
    /// Load the persisted history once. Absent or corrupt data yields an
    /// empty store.
    pub async fn load(
        storage: Arc<dyn PersistentStorage>,
        encoder: Arc<AudioContainerEncoder>,
    ) -> Self {
        let entries = match Self::read_persisted(storage.as_ref()).await {
            Ok(mut entries) => {
                if entries.len() > HISTORY_CAPACITY {
                    tracing::warn!(
                        persisted = entries.len(),
                        capacity = HISTORY_CAPACITY,
                        "Persisted history over capacity, keeping newest entries"
                    );
                    entries.truncate(HISTORY_CAPACITY);
                }
                tracing::info!(entries = entries.len(), "History loaded");
                entries
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load history, starting empty");
                Vec::new()
            }
        };

        Self {
            entries,
            storage,
            encoder,
        }
    }

    async fn read_persisted(
        storage: &dyn PersistentStorage,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        match storage
            .load(HISTORY_STORAGE_KEY)
            .await
            .map_err(PersistenceError::Storage)?
        {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the head, evicting the oldest entries beyond capacity
    pub async fn append(&mut self, entry: HistoryEntry) {
        tracing::debug!(id = %entry.id, "Appending history entry");
        self.entries.insert(0, entry);

        if self.entries.len() > HISTORY_CAPACITY {
            let evicted = self.entries.split_off(HISTORY_CAPACITY);
            tracing::debug!(evicted = evicted.len(), "Evicted oldest history entries");
        }

        self.persist().await;
    }

    /// Remove an entry by id. Unknown ids are ignored.
    pub async fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);

        if self.entries.len() == before {
            tracing::debug!(id = id, "History entry not found, nothing removed");
            return false;
        }

        self.persist().await;
        true
    }

    /// Empty the history and delete its persisted form
    pub async fn clear(&mut self) {
        self.entries.clear();

        if let Err(e) = self.storage.remove(HISTORY_STORAGE_KEY).await {
            tracing::error!(error = %e, "Failed to remove persisted history");
        } else {
            tracing::info!("History cleared");
        }
    }

    /// Rebuild a playable handle from a stored payload without touching
    /// the store. The caller owns the handle.
    pub fn replay(&self, entry: &HistoryEntry) -> Result<PlayableHandle, AudioDecodeError> {
        self.encoder.encode(&entry.raw_payload)
    }

    async fn persist(&self) {
        if let Err(e) = self.write_through().await {
            tracing::error!(
                error = %e,
                entries = self.entries.len(),
                "Failed to persist history, keeping in-memory state"
            );
        }
    }

    async fn write_through(&self) -> Result<(), PersistenceError> {
        let serialized = serde_json::to_string(&self.entries)?;
        self.storage
            .save(HISTORY_STORAGE_KEY, &serialized)
            .await
            .map_err(PersistenceError::Storage)
    }
}
