//! Environment source: DIRTRACK_<SECTION>__<KEY>, e.g. DIRTRACK_TRACKER__HASH_WORKERS=4

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "DIRTRACK";

/// Add environment overrides; they take precedence over every file source.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
