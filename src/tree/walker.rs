//! Directory enumeration for a single tracked directory

use crate::error::TrackError;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Lists the immediate files of a directory.
///
/// Entries come back in the order the directory yields them; they are never
/// sorted, so tree shape follows the filesystem's own ordering.
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    /// Create a walker for the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect file paths, `root.join(name)` for each regular file
    pub fn files(&self) -> Result<Vec<PathBuf>, TrackError> {
        self.files_with_cancel(&CancellationToken::new())
    }

    /// Collect file paths, stopping early when `cancel` fires
    pub fn files_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<PathBuf>, TrackError> {
        // walkdir reports an unreadable root lazily; surface it with the real io error.
        std::fs::read_dir(&self.root).map_err(|e| TrackError::io(&self.root, e))?;

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        let mut files = Vec::new();
        for entry in walker {
            if cancel.is_cancelled() {
                return Err(TrackError::Cancelled);
            }

            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                TrackError::io(path, source)
            })?;

            if !entry.file_type().is_file() {
                debug!(path = %entry.path().display(), "Skipping non-file entry");
                continue;
            }

            trace!(path = %entry.path().display(), "Enumerated file");
            files.push(self.root.join(entry.file_name()));
        }

        debug!(file_count = files.len(), root = %self.root.display(), "Enumerated directory");
        Ok(files)
    }
}
