//! Error types for skill-git

/// Result type for skill-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skill-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] skill_fs::Error),

    #[error("Failed to list remote refs for {repo} ({reference}): {message}")]
    RemoteHead {
        repo: String,
        reference: String,
        message: String,
    },

    #[error("Remote {repo} advertised no revision for {reference}")]
    EmptyHead { repo: String, reference: String },

    #[error("Failed to clone {url}: {message}")]
    Clone { url: String, message: String },

    #[error("Failed to check out {reference} in {url}: {message}")]
    Checkout {
        url: String,
        reference: String,
        message: String,
    },
}
