//! Document storage
//!
//! [`SnapshotStore`] is the storage seam: load the whole document, commit the
//! whole document. [`JsonFileStore`] commits by writing a temp file next to
//! the target and renaming it over; [`MemoryStore`] backs tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use super::Snapshot;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is corrupted: {0}")]
    Corrupted(String),

    #[error("Serialization failed: {0}")]
    Serialize(String),

    #[error("Atomic replace failed: {0}")]
    Persist(String),

    #[error("Blocking task failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Join(err.to_string())
    }
}

/// Whole-document storage
#[async_trait]
pub trait SnapshotStore: Send + Sync + std::fmt::Debug {
    /// Read the last committed document
    async fn load_snapshot(&self) -> Result<Snapshot, StoreError>;

    /// Replace the committed document. Either the whole snapshot becomes
    /// visible or none of it does.
    async fn commit_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

// =============================================================================
// JSON file
// =============================================================================

/// Document stored as one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// temp file in the target directory → fsync → rename over the target
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| StoreError::Persist(e.error.to_string()))?;
    Ok(())
}

fn read_or_create(path: &Path) -> Result<Snapshot, StoreError> {
    match std::fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Corrupted(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Document not found, creating empty template");
            let snapshot = Snapshot::default();
            let bytes = serde_json::to_vec_pretty(&snapshot)
                .map_err(|e| StoreError::Serialize(e.to_string()))?;
            write_atomically(path, &bytes)?;
            Ok(snapshot)
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load_snapshot(&self) -> Result<Snapshot, StoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_or_create(&path)).await?
    }

    async fn commit_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec_pretty(snapshot).map_err(|e| StoreError::Serialize(e.to_string()))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes)).await?
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<Snapshot>,
    commits: AtomicUsize,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            commits: AtomicUsize::new(0),
        }
    }

    /// Number of successful commits so far
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load_snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn commit_snapshot(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.snapshot.write().await = snapshot.clone();
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// Database
// =============================================================================

/// Serialized access to the document
///
/// Cloning is cheap; all clones share the store and the lock.
#[derive(Debug, Clone)]
pub struct Database {
    store: Arc<dyn SnapshotStore>,
    lock: Arc<Mutex<()>>,
}

impl Database {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Database backed by a JSON file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStore::new(path)))
    }

    /// Database backed by memory, seeded with `snapshot`
    pub fn in_memory(snapshot: Snapshot) -> Self {
        Self::new(Arc::new(MemoryStore::new(snapshot)))
    }

    /// Load the committed document
    pub async fn read(&self) -> Result<Snapshot, StoreError> {
        let _guard = self.lock.lock().await;
        self.store.load_snapshot().await
    }

    /// Run one unit of work: load → `f` → commit.
    ///
    /// The lock is held for the whole sequence, so units of work never
    /// interleave. When `f` returns `Err` nothing is committed.
    pub async fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Snapshot) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut snapshot = self.store.load_snapshot().await?;
        let value = f(&mut snapshot)?;
        self.store.commit_snapshot(&snapshot).await?;
        Ok(value)
    }
}
