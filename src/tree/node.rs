//! Arena-backed Merkle tree
//!
//! Nodes live in a single `Vec` and refer to their children by index. Each
//! node has at most one parent, so a tree is an ordinary owned value: a
//! snapshot loaded from disk and a tree freshly built from the directory never
//! share nodes.

use crate::types::{HashAlgorithm, HexHash, NodeIndex};
use serde::Serialize;
use std::collections::HashSet;

/// A tracked file (leaf) or the combination of two subtrees (internal node)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleNode {
    pub hash_value: HexHash,
    /// Set on leaves only
    pub file_name: Option<String>,
    pub left: Option<NodeIndex>,
    pub right: Option<NodeIndex>,
}

impl MerkleNode {
    pub fn leaf(file_name: impl Into<String>, hash_value: impl Into<HexHash>) -> Self {
        Self {
            hash_value: hash_value.into(),
            file_name: Some(file_name.into()),
            left: None,
            right: None,
        }
    }

    pub fn internal(hash_value: impl Into<HexHash>, left: NodeIndex, right: NodeIndex) -> Self {
        Self {
            hash_value: hash_value.into(),
            file_name: None,
            left: Some(left),
            right: Some(right),
        }
    }

    /// A node is a leaf iff it has no children
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Both child indices, if this is an internal node
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        match (self.left, self.right) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        }
    }
}

/// One leaf as listed by [`MerkleTree::leaves`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafEntry {
    pub file_name: String,
    pub hash_value: HexHash,
}

/// Binary Merkle tree over the files of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: Vec<MerkleNode>,
    root: Option<NodeIndex>,
}

impl MerkleTree {
    /// A tree with no files and no root
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a tree from an arena and its root index.
    ///
    /// Callers are responsible for the arena being well formed; the builder
    /// and the snapshot loader are the only producers.
    pub(crate) fn from_parts(nodes: Vec<MerkleNode>, root: Option<NodeIndex>) -> Self {
        Self { nodes, root }
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<MerkleNode> {
        &mut self.nodes
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub fn root_node(&self) -> Option<&MerkleNode> {
        self.root.map(|idx| &self.nodes[idx])
    }

    /// Root hash, or `None` for an empty tree
    pub fn root_hash(&self) -> Option<&str> {
        self.root_node().map(|node| node.hash_value.as_str())
    }

    pub fn node(&self, index: NodeIndex) -> &MerkleNode {
        &self.nodes[index]
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes, padding duplicates included
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Leaves in left-to-right order, padding duplicates included
    pub fn leaves(&self) -> Vec<LeafEntry> {
        let mut leaves = Vec::new();
        let mut stack: Vec<NodeIndex> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            match node.children() {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => leaves.push(LeafEntry {
                    file_name: node.file_name.clone().unwrap_or_default(),
                    hash_value: node.hash_value.clone(),
                }),
            }
        }
        leaves
    }

    /// Distinct tracked file names in first-seen order
    pub fn file_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = Vec::new();
        for leaf in self.leaves() {
            if seen.insert(leaf.file_name.clone()) {
                names.push(leaf.file_name);
            }
        }
        names
    }

    /// Number of levels above the leaves (0 for a single-node or empty tree)
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.root;
        while let Some(idx) = current {
            match self.nodes[idx].left {
                Some(left) => {
                    depth += 1;
                    current = Some(left);
                }
                None => break,
            }
        }
        depth
    }

    /// Recompute every internal hash and return the first inconsistent node.
    ///
    /// Leaf hashes cannot be checked without the file contents; only the
    /// combination hashes are verified.
    pub fn find_inconsistency(&self, algorithm: HashAlgorithm) -> Option<NodeIndex> {
        let mut stack: Vec<NodeIndex> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if let Some((left, right)) = node.children() {
                let expected =
                    algorithm.combine(&self.nodes[left].hash_value, &self.nodes[right].hash_value);
                if expected != node.hash_value {
                    return Some(idx);
                }
                stack.push(right);
                stack.push(left);
            }
        }
        None
    }
}
