//! On-disk schemas for the skill indexer.
//!
//! Three JSON documents are involved in a run:
//! - the sources declaration (`sources.skill.json`), read only
//! - the index (`index.skill.json`), read and rewritten when it changes
//! - one sidecar (`skill.meta.json`) per mirrored bundle, rewritten every run

pub mod error;
pub mod index;
pub mod sidecar;
pub mod sources;

pub use error::{Error, Result};
pub use index::{IndexFile, SkillEntry};
pub use sidecar::SkillMeta;
pub use sources::{Source, SourcesFile};
