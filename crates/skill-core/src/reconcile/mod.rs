//! Reconciliation of declared sources against the previous index
//!
//! This module provides:
//! - **engine**: the per-source fetch/skip decision loop and [`sync_index`]
//! - **options**: run configuration
//! - **owners**: the run-wide destination owner map
//! - **report**: what happened to each source
//! - **scratch**: scoped clone directories

mod engine;
mod options;
mod owners;
mod report;
mod scratch;

pub use engine::{Reconciler, Reconciliation, needs_path_migration, sync_index, timestamp_now};
pub use options::{DEFAULT_MARKER, DEFAULT_SOURCES_DIR, ReconcileOptions};
pub use owners::OwnerMap;
pub use report::{ReconcileReport, SourceOutcome, SourceReport};
pub use scratch::ScratchDir;
