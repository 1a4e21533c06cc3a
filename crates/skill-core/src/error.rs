//! Error types for skill-core

/// Result type for skill-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skill-core operations
///
/// Every variant is fatal for the run; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No sources declared")]
    NoSources,

    #[error("Path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: std::path::PathBuf },

    #[error("Source repo is empty")]
    EmptyRepo,

    #[error("Duplicate repo entry {repo:?}")]
    DuplicateRepo { repo: String },

    #[error("Unable to derive repo folder name from {repo:?}")]
    UnderivableFolderName { repo: String },

    #[error("Duplicate repo folder name {name:?} for {first:?} and {second:?}")]
    FolderNameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("Remote head for {repo:?} is empty")]
    EmptyHead { repo: String },

    #[error("Empty skill name in repo {repo:?}")]
    EmptySkillName { repo: String },

    #[error("Duplicate skill name {name:?} in repo {repo:?}")]
    DuplicateSkillName { name: String, repo: String },

    #[error("Skill path {path:?} already owned by repo {owner:?}")]
    PathOwned { path: String, owner: String },

    #[error("Refusing to touch unexpected path {path:?}")]
    UnsafePath { path: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from skill-fs
    #[error(transparent)]
    Fs(#[from] skill_fs::Error),

    /// Git error from skill-git
    #[error(transparent)]
    Git(#[from] skill_git::Error),

    /// Schema error from skill-meta
    #[error(transparent)]
    Meta(#[from] skill_meta::Error),
}
