//! Shared test utilities for the skill-indexer workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: real upstream repositories built with `git2`
//! - [`fake`]: [`FakeRemote`], an in-memory [`skill_git::RevisionSource`]
//! - [`tree`]: helpers for writing skill bundles to disk
//! - [`workspace`]: [`TestWorkspace`], a temp dir holding sources, index and mirror

pub mod fake;
pub mod git;
pub mod tree;
pub mod workspace;

pub use fake::{FakeRemote, RemoteCall};
pub use git::UpstreamRepo;
pub use workspace::TestWorkspace;
