//! Index file (`index.skill.json`)

use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_fs::ConfigStore;

use crate::Result;

/// Default file name of the index.
pub const DEFAULT_FILE_NAME: &str = "index.skill.json";

/// Persisted catalog of mirrored bundles and their provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFile {
    /// Opaque schema marker, carried over verbatim
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Only bumped when the entry list or schema marker changes
    #[serde(rename = "generatedAt", default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

/// One mirrored bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Bundle name, also the mirror destination key
    pub name: String,

    /// Bundle directory relative to the source root at scan time
    pub path: String,

    /// Owning repository identifier
    pub repo: String,

    /// Revision the bundle was mirrored from
    pub head: String,

    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl IndexFile {
    /// Load the index; a missing file is an empty index.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load_or_default(path)?)
    }

    /// Write the index with two-space indentation and a trailing newline.
    pub fn save(&self, path: &Path) -> Result<()> {
        Ok(ConfigStore::new().save(path, self)?)
    }

    /// Entries owned by `repo`, in file order.
    pub fn entries_for<'a>(&'a self, repo: &'a str) -> impl Iterator<Item = &'a SkillEntry> + 'a {
        self.skills.iter().filter(move |s| s.repo == repo)
    }

    /// Recorded head for `repo`: the first non-empty head among its entries.
    pub fn head_for(&self, repo: &str) -> Option<&str> {
        self.skills
            .iter()
            .filter(|s| s.repo == repo)
            .map(|s| s.head.as_str())
            .find(|h| !h.is_empty())
    }

    /// Sort entries by (repo, path, name).
    pub fn sort(&mut self) {
        self.skills.sort_by(|a, b| {
            (a.repo.as_str(), a.path.as_str(), a.name.as_str())
                .cmp(&(b.repo.as_str(), b.path.as_str(), b.name.as_str()))
        });
    }
}
