//! Configuration System
//!
//! Layered configuration built with the `config` crate. Sources, lowest
//! precedence first: built-in defaults, the global file
//! (`$XDG_CONFIG_HOME/dirtrack/config.toml`), an explicit `--config` file,
//! and `DIRTRACK_*` environment variables.

use crate::error::TrackError;
use crate::logging::LoggingConfig;
use crate::tracker::TrackerOptions;
use crate::tree::builder::TreeOptions;
use crate::types::{DedupPolicy, HashAlgorithm, PaddingPolicy};
use serde::{Deserialize, Serialize};

mod facade;
mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod environment;
    pub mod global_file;
}

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirtrackConfig {
    /// Tree building and diffing
    #[serde(default)]
    pub tracker: TrackerSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[tracker]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSettings {
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,

    /// Threads used to hash files; 1 hashes sequentially
    #[serde(default = "default_hash_workers")]
    pub hash_workers: usize,

    #[serde(default)]
    pub padding: PaddingPolicy,

    #[serde(default)]
    pub dedup: DedupPolicy,

    /// Write indented sidecar JSON
    #[serde(default)]
    pub pretty_snapshots: bool,
}

fn default_hash_workers() -> usize {
    1
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::default(),
            hash_workers: default_hash_workers(),
            padding: PaddingPolicy::default(),
            dedup: DedupPolicy::default(),
            pretty_snapshots: false,
        }
    }
}

impl TrackerSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.hash_workers == 0 {
            return Err("hash_workers must be at least 1".to_string());
        }
        Ok(())
    }

    /// Options for [`crate::tracker::ChangeTracker`]
    pub fn options(&self) -> TrackerOptions {
        TrackerOptions {
            tree: TreeOptions {
                algorithm: self.hash_algorithm,
                padding: self.padding,
                hash_workers: self.hash_workers,
            },
            dedup: self.dedup,
        }
    }
}

impl DirtrackConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), TrackError> {
        self.tracker
            .validate()
            .map_err(|e| TrackError::Config(format!("tracker: {}", e)))
    }

    /// Render as TOML, as it would appear in a config file
    pub fn to_toml(&self) -> Result<String, TrackError> {
        toml::to_string_pretty(self).map_err(|e| TrackError::Config(e.to_string()))
    }
}
