//! Integration tests for tree structure correctness

use dirtrack::tree::builder::{build_from_leaves, TreeBuilder, TreeOptions};
use dirtrack::types::{HashAlgorithm, PaddingPolicy};
use dirtrack::TrackError;
use std::fs;
use tempfile::TempDir;

fn leaves(count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| {
            (
                format!("f{}", i),
                HashAlgorithm::Sha256.hash_bytes(format!("content{}", i).as_bytes()),
            )
        })
        .collect()
}

/// Test that tree contains every file as a leaf
#[test]
fn test_tree_contains_all_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("file1.txt"), "content1").unwrap();
    fs::write(root.join("file2.txt"), "content2").unwrap();

    let tree = TreeBuilder::new(root.clone()).build().unwrap();
    let mut names = tree.file_names();
    names.sort();
    assert_eq!(
        names,
        vec![
            root.join("file1.txt").to_string_lossy().into_owned(),
            root.join("file2.txt").to_string_lossy().into_owned(),
        ]
    );
}

/// Subdirectories are not descended into
#[test]
fn test_subdirectories_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("top.txt"), "top").unwrap();
    fs::create_dir(root.join("dir1")).unwrap();
    fs::write(root.join("dir1").join("nested.txt"), "nested").unwrap();

    let tree = TreeBuilder::new(root.clone()).build().unwrap();
    assert_eq!(tree.file_names(), vec![root.join("top.txt").to_string_lossy().into_owned()]);
}

/// Leaf hashes are the hex content digest; parents hash the children's hex text
#[test]
fn test_hash_relations() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    fs::write(root.join("only.txt"), "hello").unwrap();

    let tree = TreeBuilder::new(root).build().unwrap();
    let leaf_hash = HashAlgorithm::Sha256.hash_bytes(b"hello");
    assert_eq!(
        leaf_hash,
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );

    // A single file is paired with itself
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(
        tree.root_hash().unwrap(),
        HashAlgorithm::Sha256.combine(&leaf_hash, &leaf_hash)
    );
    assert_eq!(tree.find_inconsistency(HashAlgorithm::Sha256), None);
}

/// Leaf-only padding rejects counts whose higher levels are odd
#[test]
fn test_leaf_only_padding_limits() {
    for count in [1, 2, 3, 4, 7, 8] {
        assert!(
            build_from_leaves(leaves(count), HashAlgorithm::Sha256, PaddingPolicy::LeafOnly).is_ok(),
            "{} leaves should build",
            count
        );
    }
    for count in [5, 6, 9, 10] {
        let err = build_from_leaves(leaves(count), HashAlgorithm::Sha256, PaddingPolicy::LeafOnly)
            .unwrap_err();
        assert!(matches!(err, TrackError::UnpairedLevel { .. }), "{} leaves", count);
    }
}

/// Every-level padding builds any count into a full tree
#[test]
fn test_every_level_padding_builds_full_trees() {
    for (count, depth, leaf_count) in [(5, 3, 8), (6, 3, 8), (9, 4, 16), (12, 4, 16)] {
        let tree =
            build_from_leaves(leaves(count), HashAlgorithm::Sha256, PaddingPolicy::EveryLevel)
                .unwrap();
        assert_eq!(tree.depth(), depth, "{} leaves", count);
        assert_eq!(tree.leaf_count(), leaf_count, "{} leaves", count);
        assert_eq!(tree.file_names().len(), count);
        assert_eq!(tree.find_inconsistency(HashAlgorithm::Sha256), None);
    }
}

#[test]
fn test_directory_build_with_leaf_only_padding() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    for i in 0..5 {
        fs::write(root.join(format!("f{}", i)), i.to_string()).unwrap();
    }

    let err = TreeBuilder::new(root)
        .with_options(TreeOptions {
            padding: PaddingPolicy::LeafOnly,
            ..TreeOptions::default()
        })
        .build()
        .unwrap_err();
    assert!(matches!(err, TrackError::UnpairedLevel { level: 1, width: 3 }));
}

#[test]
fn test_empty_directory_has_no_root() {
    let temp_dir = TempDir::new().unwrap();
    let tree = TreeBuilder::new(temp_dir.path()).build().unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.root_hash(), None);
    assert_eq!(tree.leaf_count(), 0);
}
