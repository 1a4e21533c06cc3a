//! Core of the skill indexer
//!
//! Mirrors skill bundles from declared source repositories into a local
//! folder and maintains the provenance index.
//!
//! # Architecture
//!
//! ```text
//!                   skill-cli
//!                       |
//!                  skill-core
//!                       |
//!         +-------------+-------------+
//!         |             |             |
//!     skill-fs      skill-git     skill-meta
//! ```
//!
//! - [`exclude`]: directory pruning rules
//! - [`scanner`]: locates bundle markers in a fetched tree
//! - [`frontmatter`]: pulls `description` and `version` out of a marker file
//! - [`mirror`]: replaces mirrored bundles and writes sidecars
//! - [`reconcile`]: the per-source decision loop driving all of the above

pub mod error;
pub mod exclude;
pub mod frontmatter;
pub mod mirror;
pub mod reconcile;
pub mod scanner;

pub use error::{Error, Result};
pub use exclude::{DEFAULT_EXCLUDES, ExcludeSet};
pub use mirror::MirrorWriter;
pub use reconcile::{
    DEFAULT_MARKER, OwnerMap, ReconcileOptions, ReconcileReport, Reconciler, Reconciliation,
    SourceOutcome, SourceReport, sync_index,
};
pub use scanner::{FoundSkill, scan};
