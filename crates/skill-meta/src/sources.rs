//! Sources declaration (`sources.skill.json`)

use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_fs::ConfigStore;

use crate::{Error, Result};

/// Default file name of the sources declaration.
pub const DEFAULT_FILE_NAME: &str = "sources.skill.json";

/// The declared list of repositories to mirror bundles from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesFile {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub sources: Vec<Source>,
}

/// One declared source repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Repository identifier: URL, scp-style remote or local path
    pub repo: String,

    /// Branch or tag to mirror; the remote default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Directory names pruned in addition to the default exclusions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl Source {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            ..Self::default()
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// The requested branch, treating `""` as "remote default".
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref().filter(|b| !b.is_empty())
    }
}

impl SourcesFile {
    /// Load the declaration, rejecting an empty `sources` list.
    pub fn load(path: &Path) -> Result<Self> {
        let file: Self = ConfigStore::new().load(path)?;
        if file.sources.is_empty() {
            return Err(Error::EmptySources {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(path = %path.display(), count = file.sources.len(), "Loaded sources");
        Ok(file)
    }
}
