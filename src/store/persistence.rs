//! Sidecar file persistence for snapshots

use crate::error::TrackError;
use crate::store::{SnapshotRecord, SnapshotStore};
use crate::tree::node::MerkleTree;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path of the sidecar snapshot for `dir`: the directory path with `.json`
/// appended.
///
/// Trailing separators are dropped first, so `data/` maps to `data.json`
/// beside the directory rather than `data/.json` inside it. Paths without a
/// final name such as `.` or `data/..` are resolved on disk first, otherwise
/// `.` would map to `..json` inside the tracked directory itself.
pub fn sidecar_path(dir: &Path) -> PathBuf {
    let mut normalized: PathBuf = dir.components().collect();
    if normalized.file_name().is_none() {
        // Unresolvable paths fail the scan before any snapshot is written.
        if let Ok(resolved) = std::fs::canonicalize(&normalized) {
            normalized = resolved;
        }
    }
    let mut raw = normalized.into_os_string();
    raw.push(".json");
    PathBuf::from(raw)
}

/// Stores each directory's snapshot in a JSON file next to it
#[derive(Debug, Clone, Default)]
pub struct SidecarStore {
    pretty: bool,
}

impl SidecarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write indented JSON instead of a single line
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn encode(&self, path: &Path, record: &Option<SnapshotRecord>) -> Result<Vec<u8>, TrackError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(record)
        } else {
            serde_json::to_vec(record)
        };
        encoded.map_err(|e| TrackError::Serialization {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl SnapshotStore for SidecarStore {
    fn load(&self, dir: &Path) -> Result<Option<MerkleTree>, TrackError> {
        let path = sidecar_path(dir);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(sidecar = %path.display(), "No snapshot found");
                return Ok(None);
            }
            Err(e) => return Err(TrackError::io(path, e)),
        };

        let record: Option<SnapshotRecord> =
            serde_json::from_slice(&bytes).map_err(|e| TrackError::Serialization {
                path: path.clone(),
                source: e,
            })?;

        let tree = match record {
            Some(record) => record
                .into_tree()
                .map_err(|reason| TrackError::MalformedSnapshot {
                    path: path.clone(),
                    reason,
                })?,
            None => MerkleTree::empty(),
        };

        debug!(
            sidecar = %path.display(),
            node_count = tree.node_count(),
            "Loaded snapshot"
        );
        Ok(Some(tree))
    }

    fn save(&self, dir: &Path, tree: &MerkleTree) -> Result<(), TrackError> {
        let path = sidecar_path(dir);
        let record = SnapshotRecord::from_tree(tree);
        let bytes = self.encode(&path, &record)?;

        std::fs::write(&path, bytes).map_err(|e| TrackError::io(&path, e))?;
        info!(sidecar = %path.display(), "Snapshot written");
        Ok(())
    }

    fn exists(&self, dir: &Path) -> Result<bool, TrackError> {
        let path = sidecar_path(dir);
        path.try_exists().map_err(|e| TrackError::io(path, e))
    }

    fn remove(&self, dir: &Path) -> Result<bool, TrackError> {
        let path = sidecar_path(dir);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(sidecar = %path.display(), "Snapshot removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(TrackError::io(path, e)),
        }
    }
}
