//! Shared types used across tree building, diffing and configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index of a node inside a tree's arena.
pub type NodeIndex = usize;

/// Hex-encoded digest as stored in snapshots.
pub type HexHash = String;

/// Content hash used for leaves and for combining child hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

/// How the builder handles a level with an odd number of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingPolicy {
    /// Pad only the leaf level; an odd higher level is an error.
    LeafOnly,
    /// Duplicate the last node of every odd level.
    #[default]
    EveryLevel,
}

/// Post-processing applied to the list of changed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Collapse one trailing pair of identical names.
    TrailingPair,
    /// Drop every repeated name, keeping first occurrences.
    #[default]
    Unique,
}

macro_rules! string_enum {
    ($ty:ty, $($variant:path => $name:literal),+ $(,)?) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($variant),)+
                    other => Err(format!(
                        "unknown value '{}' (expected one of: {})",
                        other,
                        [$($name),+].join(", ")
                    )),
                }
            }
        }
    };
}

string_enum!(HashAlgorithm, HashAlgorithm::Sha256 => "sha256", HashAlgorithm::Blake3 => "blake3");
string_enum!(
    PaddingPolicy,
    PaddingPolicy::LeafOnly => "leaf_only",
    PaddingPolicy::EveryLevel => "every_level",
);
string_enum!(
    DedupPolicy,
    DedupPolicy::TrailingPair => "trailing_pair",
    DedupPolicy::Unique => "unique",
);
