//! Snapshot stores.
//!
//! A store keeps at most one snapshot: `save` replaces it, `load` returns
//! it. The engine never lets a store error reach its caller, so stores are
//! free to fail.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key the snapshot is kept under.
pub const DEFAULT_KEY: &str = "fishbowl";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary error: {0}")]
    Binary(#[from] bincode::Error),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Durable home for the engine's snapshot bytes.
pub trait SnapshotStore {
    /// The last saved snapshot, or `None` if nothing was saved.
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the saved snapshot.
    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).save(bytes)
    }
}

/// Store that keeps the snapshot in memory.
///
/// Counts saves, which makes it handy for checking write volume.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a snapshot.
    #[must_use]
    pub fn with_snapshot(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Some(bytes),
            saves: 0,
        }
    }

    /// The stored snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        self.bytes = Some(bytes.to_vec());
        self.saves += 1;
        Ok(())
    }
}

/// Store that keeps nothing. Every game starts fresh.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl SnapshotStore for NullStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(None)
    }

    fn save(&mut self, _bytes: &[u8]) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store backed by a single file.
///
/// Saves write a sibling temp file and rename it over the snapshot, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at an exact path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store named after `DEFAULT_KEY` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{DEFAULT_KEY}.snapshot")))
    }

    /// Snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SnapshotStore for FileStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
