//! Directory-backed history store, one file per conversation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tcommon::{BoxFuture, ConversationId};

use crate::{HistoryStore, MemoryError};

#[derive(Debug)]
pub struct FilesystemHistoryStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl FilesystemHistoryStore {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("conversations")).map_err(|error| {
            MemoryError::storage(format!("failed to create history store root: {error}"))
        })?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn conversation_path(&self, id: &ConversationId) -> PathBuf {
        self.root
            .join("conversations")
            .join(format!("{}.blob", hex_encode(id.as_str().as_bytes())))
    }
}

impl HistoryStore for FilesystemHistoryStore {
    fn save<'a>(
        &'a self,
        id: &'a ConversationId,
        blob: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| MemoryError::storage("filesystem history store lock poisoned"))?;
            write_atomic(&self.conversation_path(id), &blob)
        })
    }

    fn retrieve<'a>(
        &'a self,
        id: &'a ConversationId,
    ) -> BoxFuture<'a, Result<Vec<u8>, MemoryError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| MemoryError::storage("filesystem history store lock poisoned"))?;
            let path = self.conversation_path(id);
            if !path.exists() {
                return Err(MemoryError::not_found(format!(
                    "no history stored for '{id}'"
                )));
            }
            fs::read(&path).map_err(|error| {
                MemoryError::storage(format!("failed to read history file: {error}"))
            })
        })
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), MemoryError> {
    let Some(parent) = path.parent() else {
        return Err(MemoryError::storage("history file missing parent directory"));
    };
    fs::create_dir_all(parent).map_err(|error| {
        MemoryError::storage(format!("failed to create parent directory: {error}"))
    })?;

    let tmp = path.with_extension("blob.tmp");
    fs::write(&tmp, bytes).map_err(|error| {
        MemoryError::storage(format!("failed to write temporary history file: {error}"))
    })?;

    fs::rename(&tmp, path)
        .map_err(|error| MemoryError::storage(format!("failed to finalize history file: {error}")))
}

fn hex_encode(input: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut output = String::with_capacity(input.len() * 2);
    for byte in input {
        output.push(DIGITS[usize::from(byte >> 4)] as char);
        output.push(DIGITS[usize::from(byte & 0x0f)] as char);
    }
    output
}
