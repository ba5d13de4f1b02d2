//! History store contract with no-op and in-memory implementations.
//!
//! ```rust
//! use tcommon::ConversationId;
//! use tmemory::{HistoryStore, InMemoryHistoryStore};
//!
//! # tokio_test_block_on(async {
//! let store = InMemoryHistoryStore::new();
//! let id = ConversationId::from("conversation-1");
//!
//! store.save(&id, b"{\"input\":[]}".to_vec()).await.expect("save");
//! assert_eq!(store.retrieve(&id).await.expect("retrieve"), b"{\"input\":[]}".to_vec());
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(future: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(future)
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tcommon::{BoxFuture, ConversationId};

use crate::MemoryError;

/// Opaque byte-blob persistence keyed by conversation id.
///
/// Individual operations are atomic, but nothing spans the read-modify-write
/// of a whole call: two concurrent calls on one id race, and the last save wins.
pub trait HistoryStore: Send + Sync {
    fn save<'a>(
        &'a self,
        id: &'a ConversationId,
        blob: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), MemoryError>>;

    /// Returns the last blob saved under `id`, or a `NotFound` error.
    fn retrieve<'a>(&'a self, id: &'a ConversationId)
    -> BoxFuture<'a, Result<Vec<u8>, MemoryError>>;
}

/// Accepts every save and always returns an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHistoryStore;

impl NoopHistoryStore {
    pub fn new() -> Self {
        Self
    }
}

impl HistoryStore for NoopHistoryStore {
    fn save<'a>(
        &'a self,
        _id: &'a ConversationId,
        _blob: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async { Ok(()) })
    }

    fn retrieve<'a>(
        &'a self,
        _id: &'a ConversationId,
    ) -> BoxFuture<'a, Result<Vec<u8>, MemoryError>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    blobs: Mutex<HashMap<ConversationId, Vec<u8>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, MemoryError> {
        Ok(self.blobs()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, MemoryError> {
        Ok(self.blobs()?.is_empty())
    }

    fn blobs(&self) -> Result<MutexGuard<'_, HashMap<ConversationId, Vec<u8>>>, MemoryError> {
        self.blobs
            .lock()
            .map_err(|_| MemoryError::storage("in-memory history store lock poisoned"))
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn save<'a>(
        &'a self,
        id: &'a ConversationId,
        blob: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            self.blobs()?.insert(id.clone(), blob);
            Ok(())
        })
    }

    fn retrieve<'a>(
        &'a self,
        id: &'a ConversationId,
    ) -> BoxFuture<'a, Result<Vec<u8>, MemoryError>> {
        Box::pin(async move {
            self.blobs()?
                .get(id)
                .cloned()
                .ok_or_else(|| MemoryError::not_found(format!("no history stored for '{id}'")))
        })
    }
}
