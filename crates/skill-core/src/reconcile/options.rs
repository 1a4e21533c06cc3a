//! Run configuration for the reconciler

use std::path::PathBuf;

use skill_fs::MirrorRoot;

/// Bundle marker file name, matched case-insensitively.
pub const DEFAULT_MARKER: &str = "SKILL.md";

/// Default directory sources are cloned into.
pub const DEFAULT_SOURCES_DIR: &str = "sources";

/// Options for a reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Where bundles are mirrored
    pub mirror: MirrorRoot,
    /// Parent of the per-source scratch clones
    pub sources_dir: PathBuf,
    /// Keep scratch clones after the run
    pub keep_sources: bool,
    /// Rescan sources whose index entries still use the old
    /// `<mirror>/<name>` path shape
    pub path_migration: bool,
    /// Bundle marker file name
    pub marker: String,
}

impl ReconcileOptions {
    pub fn new(mirror: MirrorRoot, sources_dir: impl Into<PathBuf>) -> Self {
        Self {
            mirror,
            sources_dir: sources_dir.into(),
            keep_sources: false,
            path_migration: true,
            marker: DEFAULT_MARKER.to_string(),
        }
    }

    pub fn with_keep_sources(mut self, keep: bool) -> Self {
        self.keep_sources = keep;
        self
    }

    pub fn with_path_migration(mut self, enabled: bool) -> Self {
        self.path_migration = enabled;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}
