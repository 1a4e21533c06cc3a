//! Git collaborator for the skill indexer
//!
//! Resolves the current head of a source repository and produces a working
//! copy of it. The engine only sees the [`RevisionSource`] trait; [`GitRemote`]
//! is the libgit2-backed implementation used by the binary.

pub mod error;
pub mod naming;
pub mod provider;
pub mod remote;

pub use error::{Error, Result};
pub use naming::repo_folder_name;
pub use provider::RevisionSource;
pub use remote::GitRemote;
