//! Snapshot Store
//!
//! Persists the last known tree of a directory so the next scan has a
//! baseline to compare against. Only one snapshot per directory is kept.

pub mod memory;
pub mod persistence;

pub use memory::MemoryStore;
pub use persistence::{sidecar_path, SidecarStore};

use crate::error::TrackError;
use crate::tree::node::{MerkleNode, MerkleTree};
use crate::types::{HexHash, NodeIndex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Nested snapshot record as written to the sidecar file.
///
/// Internal nodes carry an empty `fileName`; leaves carry `null` children.
/// The capitalized key spelling of older snapshots is accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    #[serde(alias = "HashValue")]
    pub hash_value: HexHash,
    #[serde(default, alias = "FileName")]
    pub file_name: String,
    #[serde(default, alias = "Left")]
    pub left: Option<Box<SnapshotRecord>>,
    #[serde(default, alias = "Right")]
    pub right: Option<Box<SnapshotRecord>>,
}

/// Snapshot Store interface
pub trait SnapshotStore {
    /// Load the snapshot for `dir`, `None` when the directory is untracked
    fn load(&self, dir: &Path) -> Result<Option<MerkleTree>, TrackError>;

    /// Store `tree` as the snapshot for `dir`, replacing any previous one
    fn save(&self, dir: &Path, tree: &MerkleTree) -> Result<(), TrackError>;

    /// Whether a snapshot exists for `dir`
    fn exists(&self, dir: &Path) -> Result<bool, TrackError>;

    /// Delete the snapshot for `dir`; returns false if there was none
    fn remove(&self, dir: &Path) -> Result<bool, TrackError>;
}

impl SnapshotRecord {
    /// Convert a tree into its nested record form, `None` for an empty tree
    pub fn from_tree(tree: &MerkleTree) -> Option<SnapshotRecord> {
        let root = tree.root()?;

        // Arena order puts children before parents, so one ascending pass can
        // move finished child records into their parent.
        let mut built: Vec<Option<SnapshotRecord>> = vec![None; tree.node_count()];
        for idx in 0..tree.node_count() {
            let node = tree.node(idx);
            let record = match node.children() {
                Some((left, right)) => SnapshotRecord {
                    hash_value: node.hash_value.clone(),
                    file_name: String::new(),
                    left: built[left].take().map(Box::new),
                    right: built[right].take().map(Box::new),
                },
                None => SnapshotRecord {
                    hash_value: node.hash_value.clone(),
                    file_name: node.file_name.clone().unwrap_or_default(),
                    left: None,
                    right: None,
                },
            };
            built[idx] = Some(record);
        }
        built[root].take()
    }

    /// Rebuild an arena tree from the nested record.
    ///
    /// Returns a reason string when the record does not describe a valid tree.
    pub fn into_tree(self) -> Result<MerkleTree, String> {
        enum Visit<'a> {
            Enter(&'a SnapshotRecord),
            Exit(&'a SnapshotRecord),
        }

        let mut nodes: Vec<MerkleNode> = Vec::new();
        let mut finished: Vec<NodeIndex> = Vec::new();
        let mut stack = vec![Visit::Enter(&self)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(record) => {
                    if record.hash_value.is_empty() {
                        return Err("node without hashValue".to_string());
                    }
                    match (&record.left, &record.right) {
                        (None, None) => {
                            if record.file_name.is_empty() {
                                return Err(format!(
                                    "leaf {} has no fileName",
                                    record.hash_value
                                ));
                            }
                            finished.push(nodes.len());
                            nodes.push(MerkleNode::leaf(
                                record.file_name.clone(),
                                record.hash_value.clone(),
                            ));
                        }
                        (Some(left), Some(right)) => {
                            stack.push(Visit::Exit(record));
                            stack.push(Visit::Enter(right));
                            stack.push(Visit::Enter(left));
                        }
                        _ => {
                            return Err(format!(
                                "node {} has exactly one child",
                                record.hash_value
                            ));
                        }
                    }
                }
                Visit::Exit(record) => {
                    let (right, left) = match (finished.pop(), finished.pop()) {
                        (Some(right), Some(left)) => (right, left),
                        _ => return Err("unbalanced snapshot record".to_string()),
                    };
                    finished.push(nodes.len());
                    nodes.push(MerkleNode::internal(record.hash_value.clone(), left, right));
                }
            }
        }

        let root = finished.pop();
        Ok(MerkleTree::from_parts(nodes, root))
    }
}
