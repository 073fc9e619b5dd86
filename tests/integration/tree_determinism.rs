//! Integration tests for tree building determinism

use dirtrack::tree::builder::{TreeBuilder, TreeOptions};
use dirtrack::types::HashAlgorithm;
use std::fs;
use tempfile::TempDir;

/// Test that the same directory produces the same root hash
#[test]
fn test_same_directory_same_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("file1.txt"), "content1").unwrap();
    fs::write(root.join("file2.txt"), "content2").unwrap();
    fs::write(root.join("file3.txt"), "content3").unwrap();

    let builder = TreeBuilder::new(root.clone());
    let root1 = builder.compute_root().unwrap();
    let root2 = builder.compute_root().unwrap();

    assert!(root1.is_some());
    assert_eq!(root1, root2);
}

/// Test that file content changes produce different root hashes
#[test]
fn test_file_content_change_different_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("test.txt"), "content1").unwrap();

    let builder = TreeBuilder::new(root.clone());
    let root1 = builder.compute_root().unwrap();

    fs::write(root.join("test.txt"), "content2").unwrap();
    let root2 = builder.compute_root().unwrap();

    assert_ne!(root1, root2);
}

/// Test that file addition produces different root hash
#[test]
fn test_file_addition_different_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("file1.txt"), "content").unwrap();

    let builder = TreeBuilder::new(root.clone());
    let root1 = builder.compute_root().unwrap();

    fs::write(root.join("file2.txt"), "content").unwrap();
    let root2 = builder.compute_root().unwrap();

    assert_ne!(root1, root2);
}

/// Modification times do not take part in the hash
#[test]
fn test_rewrite_with_same_content_same_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    fs::write(root.join("a"), "same").unwrap();

    let builder = TreeBuilder::new(root.clone());
    let root1 = builder.compute_root().unwrap();
    fs::write(root.join("a"), "same").unwrap();
    assert_eq!(root1, builder.compute_root().unwrap());
}

/// The two digests yield different trees over the same files
#[test]
fn test_algorithm_changes_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    fs::write(root.join("a"), "x").unwrap();
    fs::write(root.join("b"), "y").unwrap();

    let sha = TreeBuilder::new(root.clone()).compute_root().unwrap();
    let blake = TreeBuilder::new(root)
        .with_options(TreeOptions {
            algorithm: HashAlgorithm::Blake3,
            ..TreeOptions::default()
        })
        .compute_root()
        .unwrap();
    assert_ne!(sha, blake);
}
