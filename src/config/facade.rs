//! Config loading: defaults, global file, explicit file, then environment.

use super::merge::merge_policy;
use super::sources::{environment, global_file};
use super::DirtrackConfig;
use crate::error::TrackError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`DirtrackConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration. `explicit` replaces nothing: it is layered above
    /// the global file and below the environment.
    pub fn load(explicit: Option<&Path>) -> Result<DirtrackConfig, TrackError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            debug!(config_path = %path.display(), "Loading explicit configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = environment::add_to_builder(builder);

        let config: DirtrackConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load only defaults plus the given file, ignoring global and environment sources
    pub fn load_from_file(path: &Path) -> Result<DirtrackConfig, TrackError> {
        let config: DirtrackConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
