//! dirtrack: Directory Change Detection
//!
//! Hashes every file of a directory into a binary Merkle tree, keeps the
//! last tree as a `<dir>.json` snapshot next to the directory and reports
//! which files changed since that snapshot.

pub mod cli;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod logging;
pub mod store;
pub mod tracker;
pub mod tree;
pub mod types;

pub use error::TrackError;
pub use tracker::{ChangeReport, ChangeTracker, TrackerOptions};
