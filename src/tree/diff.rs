//! Tree comparison: find leaves whose content hash changed

use crate::error::TrackError;
use crate::tree::node::MerkleTree;
use crate::types::{DedupPolicy, NodeIndex};
use std::path::Path;
use tracing::debug;

/// Compare a snapshot tree against a freshly built one.
///
/// Both trees must cover the same files: a different file count or a
/// different set of base names fails with `StructuralMismatch` before any
/// leaf is compared. Subtrees with equal hashes are skipped; changed leaves are reported with the *new* tree's file name, in
/// left-to-right order, then post-processed by `dedup`.
pub fn diff_trees(
    old: &MerkleTree,
    new: &MerkleTree,
    dedup: DedupPolicy,
) -> Result<Vec<String>, TrackError> {
    let (old_root, new_root) = match (old.root(), new.root()) {
        (None, None) => return Ok(Vec::new()),
        (Some(old_root), Some(new_root)) => (old_root, new_root),
        _ => return Err(mismatch(old, new)),
    };

    // Padding maps several file counts onto one shape, so compare files.
    let old_files = base_names(old);
    let new_files = base_names(new);
    if old_files != new_files {
        return Err(mismatch(old, new));
    }

    let mut changed = Vec::new();
    let mut stack: Vec<(NodeIndex, NodeIndex)> = vec![(old_root, new_root)];
    while let Some((old_idx, new_idx)) = stack.pop() {
        let old_node = old.node(old_idx);
        let new_node = new.node(new_idx);

        if old_node.hash_value == new_node.hash_value {
            continue;
        }

        match (old_node.children(), new_node.children()) {
            (None, None) => {
                changed.push(new_node.file_name.clone().unwrap_or_default());
            }
            (Some((old_left, old_right)), Some((new_left, new_right))) => {
                // Right first so the left subtree is reported first.
                stack.push((old_right, new_right));
                stack.push((old_left, new_left));
            }
            _ => return Err(mismatch(old, new)),
        }
    }

    let raw_count = changed.len();
    let changed = apply_dedup(changed, dedup);
    debug!(raw_count, changed_count = changed.len(), "Diff completed");
    Ok(changed)
}

/// Post-process the raw list of changed names
pub fn apply_dedup(mut changed: Vec<String>, dedup: DedupPolicy) -> Vec<String> {
    match dedup {
        DedupPolicy::TrailingPair => {
            let len = changed.len();
            if len > 1 && changed[len - 1] == changed[len - 2] {
                changed.pop();
            }
            changed
        }
        DedupPolicy::Unique => {
            let mut unique: Vec<String> = Vec::with_capacity(changed.len());
            for name in changed {
                if !unique.contains(&name) {
                    unique.push(name);
                }
            }
            unique
        }
    }
}

/// Sorted base names of the tracked files.
///
/// Directory order is not stable across scans and the directory may be
/// spelled differently between runs, so only the final component counts.
fn base_names(tree: &MerkleTree) -> Vec<String> {
    let mut names: Vec<String> = tree
        .file_names()
        .iter()
        .map(|name| {
            Path::new(name)
                .file_name()
                .map(|base| base.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.clone())
        })
        .collect();
    names.sort();
    names
}

fn mismatch(old: &MerkleTree, new: &MerkleTree) -> TrackError {
    TrackError::StructuralMismatch {
        old_files: old.file_names().len(),
        new_files: new.file_names().len(),
    }
}
