//! Tree builder for constructing directory Merkle trees

use crate::error::TrackError;
use crate::tree::hasher;
use crate::tree::node::{MerkleNode, MerkleTree};
use crate::tree::walker::Walker;
use crate::types::{HashAlgorithm, HexHash, NodeIndex, PaddingPolicy};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Options controlling how a tree is hashed and shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    pub algorithm: HashAlgorithm,
    pub padding: PaddingPolicy,
    /// Number of threads used to hash files (1 = sequential)
    pub hash_workers: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            padding: PaddingPolicy::default(),
            hash_workers: 1,
        }
    }
}

/// Builds the Merkle tree for one directory
pub struct TreeBuilder {
    root: PathBuf,
    options: TreeOptions,
}

impl TreeBuilder {
    /// Create a new tree builder for the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: TreeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TreeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build the tree from the directory's current contents
    pub fn build(&self) -> Result<MerkleTree, TrackError> {
        self.build_with_cancel(&CancellationToken::new())
    }

    /// Build the tree; enumeration and hashing stop when `cancel` fires
    #[instrument(skip(self, cancel), fields(dir = %self.root.display()))]
    pub fn build_with_cancel(&self, cancel: &CancellationToken) -> Result<MerkleTree, TrackError> {
        let start = Instant::now();
        debug!("Starting tree build");

        let files = Walker::new(&self.root).files_with_cancel(cancel)?;
        let hashes = hasher::hash_files(
            self.options.algorithm,
            &files,
            self.options.hash_workers,
            cancel,
        )
        .inspect_err(|e| error!("Hashing failed: {}", e))?;

        let leaves = files
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .zip(hashes)
            .collect();

        let tree = build_from_leaves(leaves, self.options.algorithm, self.options.padding)?;

        info!(
            file_count = files.len(),
            node_count = tree.node_count(),
            root_hash = tree.root_hash().unwrap_or("-"),
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );
        Ok(tree)
    }

    /// Root hash of the directory, `None` when it holds no files
    pub fn compute_root(&self) -> Result<Option<HexHash>, TrackError> {
        let tree = self.build()?;
        Ok(tree.root_hash().map(str::to_string))
    }
}

/// Build a tree from ordered `(file name, content hash)` pairs.
///
/// An odd leaf count is padded by repeating the last leaf. Higher levels are
/// paired iteratively; an odd higher level is handled by `padding`.
pub fn build_from_leaves(
    mut leaves: Vec<(String, HexHash)>,
    algorithm: HashAlgorithm,
    padding: PaddingPolicy,
) -> Result<MerkleTree, TrackError> {
    if leaves.is_empty() {
        return Ok(MerkleTree::empty());
    }

    if leaves.len() % 2 != 0 {
        if let Some(last) = leaves.last().cloned() {
            debug!(file = %last.0, "Duplicating last leaf to pair an odd file count");
            leaves.push(last);
        }
    }

    let mut nodes: Vec<MerkleNode> = Vec::with_capacity(leaves.len() * 2);
    let mut level: Vec<NodeIndex> = Vec::with_capacity(leaves.len());
    for (file_name, hash) in leaves {
        level.push(nodes.len());
        nodes.push(MerkleNode::leaf(file_name, hash));
    }

    let mut depth = 0;
    while level.len() > 1 {
        if level.len() % 2 != 0 {
            match padding {
                PaddingPolicy::LeafOnly => {
                    warn!(level = depth, width = level.len(), "Odd level cannot be paired");
                    return Err(TrackError::UnpairedLevel {
                        level: depth,
                        width: level.len(),
                    });
                }
                PaddingPolicy::EveryLevel => {
                    let last = level[level.len() - 1];
                    let copy = copy_subtree(&mut nodes, last);
                    debug!(level = depth, "Duplicating last subtree to pair an odd level");
                    level.push(copy);
                }
            }
        }

        let mut parents = Vec::with_capacity(level.len() / 2);
        for pair in level.chunks_exact(2) {
            let (left, right) = (pair[0], pair[1]);
            let hash = algorithm.combine(&nodes[left].hash_value, &nodes[right].hash_value);
            parents.push(nodes.len());
            nodes.push(MerkleNode::internal(hash, left, right));
        }

        level = parents;
        depth += 1;
    }

    let root = level.first().copied();
    Ok(MerkleTree::from_parts(nodes, root))
}

/// Append a fresh copy of the subtree rooted at `root`, returning the copy's index.
///
/// Children are always pushed before their parents, so copying in ascending
/// index order sees every child before the node that refers to it.
fn copy_subtree(nodes: &mut Vec<MerkleNode>, root: NodeIndex) -> NodeIndex {
    let mut members = Vec::new();
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        members.push(idx);
        if let Some((left, right)) = nodes[idx].children() {
            stack.push(left);
            stack.push(right);
        }
    }
    members.sort_unstable();

    let mut remap: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(members.len());
    for idx in members {
        let mut copy = nodes[idx].clone();
        copy.left = copy.left.map(|child| remap[&child]);
        copy.right = copy.right.map(|child| remap[&child]);
        remap.insert(idx, nodes.len());
        nodes.push(copy);
    }
    remap[&root]
}
