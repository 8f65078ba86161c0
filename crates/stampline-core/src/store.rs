//! Reading and writing note content. The command only ever talks to notes through [`NoteStore`].

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::notes::{scan_note_paths, ScanError};

/// Whole-note access, addressed by vault-relative path.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Full text of the note.
    async fn read_note(&self, path: &str) -> Result<String, StoreError>;
    /// Replace the full text of the note.
    async fn write_note(&self, path: &str, content: &str) -> Result<(), StoreError>;
    /// Candidate notes, e.g. for picking a target.
    async fn list_notes(&self) -> Result<Vec<String>, StoreError>;
}

/// Notes as `.md` files under a vault directory.
#[derive(Debug, Clone)]
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        let rel = Path::new(path);
        if path.is_empty() || rel.components().any(|c| !matches!(c, Component::Normal(_) | Component::CurDir)) {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl NoteStore for VaultStore {
    async fn read_note(&self, path: &str) -> Result<String, StoreError> {
        let full = self.resolve(path)?;
        debug!(path = %full.display(), "reading note");
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| StoreError::Read(path.to_string(), e))
    }

    async fn write_note(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        debug!(path = %full.display(), bytes = content.len(), "writing note");
        tokio::fs::write(&full, content)
            .await
            .map_err(|e| StoreError::Write(path.to_string(), e))
    }

    async fn list_notes(&self) -> Result<Vec<String>, StoreError> {
        Ok(scan_note_paths(&self.root)?)
    }
}

/// Notes held in memory. Handy for hosts that own the content themselves, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.lock().insert(path.into(), content.into());
        self
    }

    /// Current content of `path`, if present.
    pub fn get(&self, path: &str) -> Option<String> {
        self.lock().get(path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.notes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn read_note(&self, path: &str) -> Result<String, StoreError> {
        self.get(path).ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn write_note(&self, path: &str, content: &str) -> Result<(), StoreError> {
        self.lock().insert(path.to_string(), content.to_string());
        Ok(())
    }

    async fn list_notes(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock().keys().cloned().collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid note path: {0:?}")]
    InvalidPath(String),
    #[error("note not found: {0}")]
    NotFound(String),
    #[error("failed to read {0}: {1}")]
    Read(String, std::io::Error),
    #[error("failed to write {0}: {1}")]
    Write(String, std::io::Error),
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
}
