use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

/// Errors produced by task storage backends.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The backing data exists but could not be read.
    #[error("failed to read {location}: {reason}")]
    Read { location: String, reason: String },
    /// The task list could not be written back.
    #[error("failed to write {location}: {reason}")]
    Write { location: String, reason: String },
}

/// Whole-collection persistence used by the task manager. Backends store one
/// opaque document; encoding is the caller's business.
pub trait TaskStorage {
    /// Human-readable location for messages and logs (e.g. a file path).
    fn location(&self) -> String;

    /// Return the stored document, or `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the stored document.
    fn write(&self, contents: &[u8]) -> Result<(), StorageError>;
}

/// In-memory storage for tests and dry runs. Clones share the same state, so a
/// test can keep a handle after moving one into a manager.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskStorage {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    contents: Option<Vec<u8>>,
    writes: usize,
    fail_writes: bool,
}

impl InMemoryTaskStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing document, as if it had been saved earlier.
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        storage.state().contents = Some(contents.into());
        storage
    }

    /// Current document, if any.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.state().contents.clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // Nothing panics while holding the lock, so a poisoned guard is still consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TaskStorage for InMemoryTaskStorage {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.state().contents.clone())
    }

    fn write(&self, contents: &[u8]) -> Result<(), StorageError> {
        let mut state = self.state();
        if state.fail_writes {
            return Err(StorageError::Write {
                location: self.location(),
                reason: "writes disabled".to_string(),
            });
        }
        state.contents = Some(contents.to_vec());
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_storage_reads_none() {
        let storage = InMemoryTaskStorage::new();
        assert_eq!(storage.read().expect("read"), None);
    }

    #[test]
    fn write_replaces_contents_and_counts() {
        let storage = InMemoryTaskStorage::with_contents("[]");
        storage.write(b"[1]").expect("write");
        storage.write(b"[2]").expect("write");

        assert_eq!(storage.read().expect("read"), Some(b"[2]".to_vec()));
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn clones_share_state() {
        let storage = InMemoryTaskStorage::new();
        let handle = storage.clone();
        storage.write(b"data").expect("write");
        assert_eq!(handle.contents(), Some(b"data".to_vec()));
    }

    #[test]
    fn failing_writes_leave_contents_untouched() {
        let storage = InMemoryTaskStorage::with_contents("old");
        storage.set_fail_writes(true);

        let err = storage.write(b"new").expect_err("write should fail");
        assert!(matches!(err, StorageError::Write { .. }));
        assert_eq!(storage.contents(), Some(b"old".to_vec()));
        assert_eq!(storage.write_count(), 0);
    }
}
