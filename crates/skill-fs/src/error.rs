//! Error types for skill-fs

use std::path::PathBuf;

/// Result type for skill-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skill-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to serialize JSON for {path}: {message}")]
    ConfigSerialize { path: PathBuf, message: String },

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Source path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Invalid mirror root folder name: {name:?}")]
    InvalidMirrorRoot { name: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn walk(root: &std::path::Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(std::path::Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        match err.into_io_error() {
            Some(source) => Self::Io { path, source },
            None => Self::Walk {
                path,
                message: "filesystem loop detected".to_string(),
            },
        }
    }
}
