//! Change tracking for a directory
//!
//! Builds the current tree, compares it with the stored snapshot and reports
//! the files whose content changed. The first scan of a directory records a
//! baseline and reports nothing.
//!
//! Snapshots are never refreshed implicitly: repeated scans keep reporting
//! the same changes until the caller runs [`ChangeTracker::commit`].
//! Concurrent scans of the same directory race on the snapshot and must be
//! serialized by the caller.

use crate::error::TrackError;
use crate::store::{SidecarStore, SnapshotStore};
use crate::tree::builder::{TreeBuilder, TreeOptions};
use crate::tree::diff::diff_trees;
use crate::tree::node::MerkleTree;
use crate::types::{DedupPolicy, HexHash, NodeIndex};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Options for [`ChangeTracker`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerOptions {
    pub tree: TreeOptions,
    pub dedup: DedupPolicy,
}

/// Outcome of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    pub directory: PathBuf,
    /// True when no snapshot existed and this scan recorded one
    pub baseline_created: bool,
    /// Changed file paths in tree order
    pub changed: Vec<String>,
    pub root_hash: Option<HexHash>,
    pub leaf_count: usize,
}

/// Result of checking a stored snapshot's internal hashes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SnapshotHealth {
    Missing,
    Consistent { root_hash: Option<HexHash>, leaf_count: usize },
    Inconsistent { node: NodeIndex, hash_value: HexHash },
}

/// Orchestrates scanning, snapshot persistence and diffing
pub struct ChangeTracker<S: SnapshotStore = SidecarStore> {
    store: S,
    options: TrackerOptions,
}

impl ChangeTracker<SidecarStore> {
    /// Tracker persisting snapshots as `<dir>.json` sidecar files
    pub fn sidecar(options: TrackerOptions) -> Self {
        Self::new(SidecarStore::new(), options)
    }
}

impl<S: SnapshotStore> ChangeTracker<S> {
    pub fn new(store: S, options: TrackerOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    /// Build the tree for the directory's current contents
    pub fn build_tree(&self, dir: &Path) -> Result<MerkleTree, TrackError> {
        self.build_tree_with_cancel(dir, &CancellationToken::new())
    }

    pub fn build_tree_with_cancel(
        &self,
        dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<MerkleTree, TrackError> {
        TreeBuilder::new(dir)
            .with_options(self.options.tree)
            .build_with_cancel(cancel)
    }

    /// Changed files since the snapshot; empty on the first scan
    pub fn find_changes(&self, dir: &Path) -> Result<Vec<String>, TrackError> {
        Ok(self.track(dir)?.changed)
    }

    /// Scan the directory and compare it with its snapshot
    pub fn track(&self, dir: &Path) -> Result<ChangeReport, TrackError> {
        self.track_with_cancel(dir, &CancellationToken::new())
    }

    /// Like [`track`](Self::track); `cancel` aborts the scan before any
    /// snapshot is read or written
    pub fn track_with_cancel(
        &self,
        dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<ChangeReport, TrackError> {
        Ok(self.scan_with_cancel(dir, cancel)?.0)
    }

    /// Like [`track`](Self::track), also returning the tree the report was
    /// computed from so it can be passed to [`commit_tree`](Self::commit_tree)
    pub fn scan(&self, dir: &Path) -> Result<(ChangeReport, MerkleTree), TrackError> {
        self.scan_with_cancel(dir, &CancellationToken::new())
    }

    #[instrument(skip(self, cancel), fields(dir = %dir.display()))]
    pub fn scan_with_cancel(
        &self,
        dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<(ChangeReport, MerkleTree), TrackError> {
        let current = self.build_tree_with_cancel(dir, cancel)?;

        let Some(snapshot) = self.store.load(dir)? else {
            info!("Directory was not tracked, recording baseline");
            self.store.save(dir, &current)?;
            let report = self.report(dir, &current, true, Vec::new());
            return Ok((report, current));
        };

        let changed = diff_trees(&snapshot, &current, self.options.dedup).inspect_err(|e| {
            if e.is_structural_mismatch() {
                warn!("Snapshot no longer matches directory shape: {}", e);
            }
        })?;

        info!(changed_count = changed.len(), "Compared directory with snapshot");
        let report = self.report(dir, &current, false, changed);
        Ok((report, current))
    }

    /// Replace the snapshot with the directory's current state
    pub fn commit(&self, dir: &Path) -> Result<MerkleTree, TrackError> {
        let current = self.build_tree(dir)?;
        self.commit_tree(dir, &current)?;
        Ok(current)
    }

    /// Store an already built tree as the directory's snapshot without
    /// rescanning it
    #[instrument(skip(self, tree), fields(dir = %dir.display()))]
    pub fn commit_tree(&self, dir: &Path, tree: &MerkleTree) -> Result<(), TrackError> {
        self.store.save(dir, tree)?;
        info!(root_hash = tree.root_hash().unwrap_or("-"), "Snapshot committed");
        Ok(())
    }

    /// Drop the snapshot so the next scan records a fresh baseline
    pub fn forget(&self, dir: &Path) -> Result<bool, TrackError> {
        self.store.remove(dir)
    }

    /// Recompute the snapshot's internal hashes
    pub fn verify(&self, dir: &Path) -> Result<SnapshotHealth, TrackError> {
        let Some(snapshot) = self.store.load(dir)? else {
            return Ok(SnapshotHealth::Missing);
        };

        let health = match snapshot.find_inconsistency(self.options.tree.algorithm) {
            Some(node) => SnapshotHealth::Inconsistent {
                node,
                hash_value: snapshot.node(node).hash_value.clone(),
            },
            None => SnapshotHealth::Consistent {
                root_hash: snapshot.root_hash().map(str::to_string),
                leaf_count: snapshot.leaf_count(),
            },
        };
        Ok(health)
    }

    fn report(
        &self,
        dir: &Path,
        tree: &MerkleTree,
        baseline_created: bool,
        changed: Vec<String>,
    ) -> ChangeReport {
        ChangeReport {
            directory: dir.to_path_buf(),
            baseline_created,
            changed,
            root_hash: tree.root_hash().map(str::to_string),
            leaf_count: tree.leaf_count(),
        }
    }
}

impl<S: SnapshotStore + Send + Sync + 'static> ChangeTracker<S> {
    /// Run [`track_with_cancel`](Self::track_with_cancel) on the blocking pool
    pub async fn track_async(
        self: Arc<Self>,
        dir: PathBuf,
        cancel: CancellationToken,
    ) -> Result<ChangeReport, TrackError> {
        tokio::task::spawn_blocking(move || self.track_with_cancel(&dir, &cancel))
            .await
            .unwrap_or_else(|e| {
                if e.is_cancelled() {
                    Err(TrackError::Cancelled)
                } else {
                    std::panic::resume_unwind(e.into_panic())
                }
            })
    }
}
