//! Scoped scratch directories for fetched sources

use std::path::{Path, PathBuf};

use skill_fs::io;

/// A clone directory removed when dropped, unless retention was requested.
///
/// Removal is best effort: a failure is logged and otherwise ignored.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    keep: bool,
}

impl ScratchDir {
    pub fn new(path: impl Into<PathBuf>, keep: bool) -> Self {
        Self {
            path: path.into(),
            keep,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.keep {
            tracing::debug!(path = %self.path.display(), "Keeping fetched source");
            return;
        }
        io::remove_dir_best_effort(&self.path);
    }
}
