//! In-process snapshot store

use crate::error::TrackError;
use crate::store::SnapshotStore;
use crate::tree::node::MerkleTree;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Keeps snapshots in memory, keyed by directory path.
///
/// Trees are cloned in and out, so a loaded snapshot never aliases the
/// stored one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: RwLock<HashMap<PathBuf, MerkleTree>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.read().is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, dir: &Path) -> Result<Option<MerkleTree>, TrackError> {
        Ok(self.snapshots.read().get(dir).cloned())
    }

    fn save(&self, dir: &Path, tree: &MerkleTree) -> Result<(), TrackError> {
        self.snapshots
            .write()
            .insert(dir.to_path_buf(), tree.clone());
        Ok(())
    }

    fn exists(&self, dir: &Path) -> Result<bool, TrackError> {
        Ok(self.snapshots.read().contains_key(dir))
    }

    fn remove(&self, dir: &Path) -> Result<bool, TrackError> {
        Ok(self.snapshots.write().remove(dir).is_some())
    }
}
