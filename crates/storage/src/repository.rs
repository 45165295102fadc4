use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable key/value storage for client-side state (the desktop stand-in for
/// browser local storage).
///
/// `set` writes all entries atomically: either every key is updated or none is.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Read one value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a batch of entries in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the batch cannot be written; nothing is written in that case.
    async fn set(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Remove every stored entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be cleared.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local storage for tests and throwaway runs.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ClientStorage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        for (key, value) in entries {
            guard.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clear();
        Ok(())
    }
}

/// Storage adapters behind trait objects so the backend can be swapped at the composition root.
#[derive(Clone)]
pub struct Storage {
    pub client_state: Arc<dyn ClientStorage>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let client_state: Arc<dyn ClientStorage> = Arc::new(InMemoryStorage::new());
        Self { client_state }
    }
}
