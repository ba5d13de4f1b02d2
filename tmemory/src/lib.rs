//! Conversation history persistence behind a single opaque byte-blob store.

mod error;
mod filesystem;
mod store;

pub mod prelude {
    pub use crate::{
        FilesystemHistoryStore, HistoryStore, InMemoryHistoryStore, MemoryError, MemoryErrorKind,
        NoopHistoryStore,
    };
}

pub use error::{MemoryError, MemoryErrorKind};
pub use filesystem::FilesystemHistoryStore;
pub use store::{HistoryStore, InMemoryHistoryStore, NoopHistoryStore};
