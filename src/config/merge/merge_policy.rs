//! Merge rules: defaults first, every later source overrides earlier ones.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("tracker.hash_algorithm", "sha256")?
        .set_default("tracker.hash_workers", 1)?
        .set_default("tracker.padding", "every_level")?
        .set_default("tracker.dedup", "unique")?
        .set_default("tracker.pretty_snapshots", false)
}
