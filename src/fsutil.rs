//! Filesystem helpers used before tracking starts

use crate::error::TrackError;
use std::path::Path;
use tracing::debug;

/// Create `path` and any missing parents; a no-op when it already exists.
///
/// New directories get mode 0755 on Unix.
pub fn create_dir_if_not_exists(path: &Path) -> Result<bool, TrackError> {
    if path.try_exists().map_err(|e| TrackError::io(path, e))? {
        return Ok(false);
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path).map_err(|e| TrackError::io(path, e))?;

    debug!(path = %path.display(), "Created directory");
    Ok(true)
}
