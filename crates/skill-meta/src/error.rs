//! Error types for skill-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] skill_fs::Error),

    #[error("Sources list is empty in {path}")]
    EmptySources { path: PathBuf },
}
