//! Persistent per-actor kill counters.
//!
//! The whole [`PersistedState`] is held in memory and written back in full
//! after every mutation. There is no batching: a handler that changes a
//! counter saves before it returns.

use killawards_types::{ActorId, ActorRecord, LegacyPersistedState, PersistedState};
use tracing::{debug, info, warn};

use crate::config::SYSTEM_NAME;
use crate::storage::{DocumentStore, StorageError};

/// Errors that can occur when persisting counters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The state document could not be written or removed.
    #[error("counter storage error: {0}")]
    Storage(#[from] StorageError),

    /// The state could not be encoded.
    #[error("counter serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Kill counters for every tracked actor, backed by a document store.
#[derive(Debug)]
pub struct CounterStore {
    documents: Box<dyn DocumentStore>,
    state: PersistedState,
}

impl CounterStore {
    /// Load the stored counters, or start empty.
    ///
    /// A missing document yields an empty store. An unreadable or corrupt
    /// document is logged and also yields an empty store; it will be
    /// overwritten by the next save.
    pub fn load_or_create(documents: Box<dyn DocumentStore>) -> Self {
        let state = match documents.read(SYSTEM_NAME) {
            Ok(Some(text)) => match decode(&text) {
                Ok(state) => state,
                Err(e) => {
                    warn!(error = %e, "Stored counters are corrupt, starting empty");
                    PersistedState::default()
                }
            },
            Ok(None) => {
                debug!("No stored counters, starting empty");
                PersistedState::default()
            }
            Err(e) => {
                warn!(error = %e, "Stored counters are unreadable, starting empty");
                PersistedState::default()
            }
        };

        info!(actors = state.actors.len(), "Counter store loaded");
        Self { documents, state }
    }

    /// The actor's current counter, if the actor has a record.
    pub fn kill_count(&self, actor: ActorId) -> Option<u32> {
        self.state.actors.get(&actor).map(|record| record.kill_count)
    }

    /// The actor's record, created at zero if absent.
    pub fn record_mut(&mut self, actor: ActorId) -> &mut ActorRecord {
        self.state.actors.entry(actor).or_default()
    }

    /// Set the actor's counter to zero if a record exists.
    ///
    /// Returns `true` when a record was found. Does not save.
    pub fn reset_if_present(&mut self, actor: ActorId) -> bool {
        match self.state.actors.get_mut(&actor) {
            Some(record) => {
                record.kill_count = 0;
                true
            }
            None => false,
        }
    }

    /// Number of actors with a record.
    pub fn len(&self) -> usize {
        self.state.actors.len()
    }

    /// Whether no actor has a record yet.
    pub fn is_empty(&self) -> bool {
        self.state.actors.is_empty()
    }

    /// The in-memory state.
    pub const fn state(&self) -> &PersistedState {
        &self.state
    }

    /// Write every counter to the backing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or writing fails. In-memory state
    /// is kept either way.
    pub fn save(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.state)?;
        self.documents.write(SYSTEM_NAME, &text)?;
        Ok(())
    }

    /// Drop every record and delete the backing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the document cannot be removed.
    /// Memory is cleared regardless.
    pub fn wipe(&mut self) -> Result<(), StoreError> {
        let dropped = self.state.actors.len();
        self.state.actors.clear();
        self.documents.remove(SYSTEM_NAME)?;
        info!(dropped, "Counter store wiped");
        Ok(())
    }
}

/// Decode the counter document, accepting the legacy `Players`-wrapped
/// shape. The next save rewrites it in the current shape.
fn decode(text: &str) -> Result<PersistedState, serde_json::Error> {
    let current_err = match serde_json::from_str::<PersistedState>(text) {
        Ok(state) => return Ok(state),
        Err(e) => e,
    };
    match serde_json::from_str::<LegacyPersistedState>(text) {
        Ok(legacy) => {
            info!(actors = legacy.players.len(), "Converted legacy counter document");
            Ok(legacy.into())
        }
        Err(_) => Err(current_err),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryDocumentStore;

    const ALICE: ActorId = ActorId(76_561_198_000_000_001);
    const BOB: ActorId = ActorId(76_561_198_000_000_002);

    #[test]
    fn missing_document_starts_empty() {
        let store = CounterStore::load_or_create(Box::new(MemoryDocumentStore::new()));
        assert!(store.is_empty());
        assert_eq!(store.kill_count(ALICE), None);
    }

    #[test]
    fn corrupt_document_starts_empty() {
        let documents = MemoryDocumentStore::with_document(SYSTEM_NAME, "[1, 2");
        let store = CounterStore::load_or_create(Box::new(documents));
        assert!(store.is_empty());
    }

    #[test]
    fn legacy_document_is_converted() {
        let documents = MemoryDocumentStore::with_document(
            SYSTEM_NAME,
            r#"{"Players":{"76561198000000001":{"Kills":2}}}"#,
        );
        let store = CounterStore::load_or_create(Box::new(documents.clone()));
        assert_eq!(store.kill_count(ALICE), Some(2));
        assert_eq!(store.len(), 1);

        store.save().unwrap();
        let rewritten = documents.get(SYSTEM_NAME).unwrap();
        assert!(!rewritten.contains("Players"));
        assert!(rewritten.contains("killCount"));
    }

    #[test]
    fn unrelated_object_is_treated_as_corrupt() {
        let documents = MemoryDocumentStore::with_document(SYSTEM_NAME, r#"{"Teams":{}}"#);
        let store = CounterStore::load_or_create(Box::new(documents));
        assert!(store.is_empty());
    }

    #[test]
    fn saved_counters_reload() {
        let documents = MemoryDocumentStore::new();
        let mut store = CounterStore::load_or_create(Box::new(documents.clone()));
        store.record_mut(ALICE).kill_count = 2;
        store.save().unwrap();

        let reloaded = CounterStore::load_or_create(Box::new(documents));
        assert_eq!(reloaded.kill_count(ALICE), Some(2));
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn reset_only_touches_existing_records() {
        let mut store = CounterStore::load_or_create(Box::new(MemoryDocumentStore::new()));
        store.record_mut(ALICE).kill_count = 3;

        assert!(store.reset_if_present(ALICE));
        assert_eq!(store.kill_count(ALICE), Some(0));

        assert!(!store.reset_if_present(BOB));
        assert_eq!(store.kill_count(BOB), None);
    }

    #[test]
    fn wipe_clears_memory_and_document() {
        let documents = MemoryDocumentStore::new();
        let mut store = CounterStore::load_or_create(Box::new(documents.clone()));
        store.record_mut(ALICE).kill_count = 1;
        store.save().unwrap();
        assert!(documents.get(SYSTEM_NAME).is_some());

        store.wipe().unwrap();
        assert!(store.is_empty());
        assert!(documents.get(SYSTEM_NAME).is_none());
    }
}
