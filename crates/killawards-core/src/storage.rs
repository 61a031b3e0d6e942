//! Named JSON document storage.
//!
//! The engine persists exactly two documents: the configuration and the
//! counter state. Both are addressed by a bare name (the system name); the
//! backend decides where the bytes live.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Errors raised by a [`DocumentStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing, or removing a document failed.
    #[error("I/O error on document '{name}': {source}")]
    Io {
        /// The document being accessed.
        name: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// A place where named text documents are kept.
pub trait DocumentStore: core::fmt::Debug {
    /// Read a document. Returns `Ok(None)` when it does not exist.
    fn read(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Create or replace a document.
    fn write(&self, name: &str, contents: &str) -> Result<(), StorageError>;

    /// Remove a document. Removing a missing document succeeds.
    fn remove(&self, name: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// Filesystem backend
// ---------------------------------------------------------------------------

/// Stores each document as `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory documents are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file backing `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl DocumentStore for FsDocumentStore {
    fn read(&self, name: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                name: name.to_owned(),
                source,
            }),
        }
    }

    fn write(&self, name: &str, contents: &str) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            name: name.to_owned(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(io_err)?;

        // Write beside the target and rename so readers never see a
        // half-written document.
        let target = self.path_for(name);
        let staging = self.root.join(format!("{name}.json.tmp"));
        fs::write(&staging, contents).map_err(io_err)?;
        fs::rename(&staging, &target).map_err(io_err)?;

        tracing::trace!(path = %target.display(), "Document written");
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                name: name.to_owned(),
                source,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Keeps documents in process memory.
///
/// Clones share the same underlying map, so a caller can hand one clone to
/// the service and keep another to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one document.
    pub fn with_document(name: &str, contents: &str) -> Self {
        let store = Self::new();
        store
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), contents.to_owned());
        store
    }

    /// Current contents of a document, if present.
    pub fn get(&self, name: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(name))
    }

    fn write(&self, name: &str, contents: &str) -> Result<(), StorageError> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), contents.to_owned());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fs_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path().join("nested"));

        assert!(store.read("KillAwards").unwrap().is_none());

        store.write("KillAwards", "{\"a\":1}").unwrap();
        assert_eq!(store.read("KillAwards").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(store.path_for("KillAwards").exists());
        assert!(!dir.path().join("nested").join("KillAwards.json.tmp").exists());

        store.remove("KillAwards").unwrap();
        assert!(store.read("KillAwards").unwrap().is_none());
    }

    #[test]
    fn removing_missing_document_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());
        assert!(store.remove("absent").is_ok());
    }

    #[test]
    fn memory_store_clones_share_documents() {
        let store = MemoryDocumentStore::new();
        let observer = store.clone();

        store.write("doc", "hello").unwrap();
        assert_eq!(observer.get("doc").as_deref(), Some("hello"));

        store.remove("doc").unwrap();
        assert!(observer.get("doc").is_none());
    }
}
