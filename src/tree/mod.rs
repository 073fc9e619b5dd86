//! Directory Merkle Tree
//!
//! Represents the files of one directory as a binary Merkle tree: leaves
//! hold content hashes, internal nodes hold the hash of their children's
//! hashes.

pub mod builder;
pub mod diff;
pub mod hasher;
pub mod node;
pub mod walker;
