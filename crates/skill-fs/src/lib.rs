//! Filesystem layer for the skill indexer
//!
//! Provides forward-slash path handling, the mirror-root path guard and the
//! I/O primitives the reconciliation engine builds on: atomic writes, JSON
//! config loading, permission-preserving tree copies and guarded removal.

pub mod config;
pub mod error;
pub mod guard;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use guard::MirrorRoot;
pub use path::NormalizedPath;
