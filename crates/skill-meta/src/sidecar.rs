//! Per-bundle sidecar metadata (`skill.meta.json`)

use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_fs::ConfigStore;

use crate::Result;

/// File name of the sidecar inside each mirrored bundle.
pub const FILE_NAME: &str = "skill.meta.json";

/// Descriptor written next to the mirrored content of one bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Refreshed on every run, even when the content is untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<String>,
}

impl SkillMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load the sidecar in `bundle_dir`.
    pub fn load(bundle_dir: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(&bundle_dir.join(FILE_NAME))?)
    }

    /// Write the sidecar into `bundle_dir`.
    pub fn save(&self, bundle_dir: &Path) -> Result<()> {
        Ok(ConfigStore::new().save(&bundle_dir.join(FILE_NAME), self)?)
    }
}
