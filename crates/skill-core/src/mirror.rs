//! Mirror writer
//!
//! Replaces the mirrored copy of a source's bundles. Every destination goes
//! through [`MirrorRoot`] first; a rejected path aborts the run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use skill_fs::{MirrorRoot, io};
use skill_meta::{SkillEntry, SkillMeta};

use crate::scanner::FoundSkill;
use crate::{Error, Result};

/// Writes bundles and sidecars under one mirror root.
#[derive(Debug, Clone, Copy)]
pub struct MirrorWriter<'a> {
    root: &'a MirrorRoot,
}

impl<'a> MirrorWriter<'a> {
    pub fn new(root: &'a MirrorRoot) -> Self {
        Self { root }
    }

    /// Guarded on-disk directory of a bundle.
    pub fn bundle_dir(&self, name: &str) -> Result<PathBuf> {
        self.root.bundle_dir(name).ok_or_else(|| Error::UnsafePath {
            path: self.root.destination(name),
        })
    }

    /// Delete the mirrored directories of previously indexed entries.
    ///
    /// Entries with an empty name are ignored. Missing directories are fine.
    pub fn remove_owned<'e, I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'e SkillEntry>,
    {
        let mut removed = 0;
        for entry in entries {
            if entry.name.is_empty() {
                continue;
            }
            let target = self.bundle_dir(&entry.name)?;
            if target.exists() {
                removed += 1;
            }
            tracing::debug!(name = %entry.name, path = %target.display(), "Removing mirrored skill");
            io::remove_dir_all(&target)?;
        }
        Ok(removed)
    }

    /// Copy every found bundle from `source_root` into the mirror.
    ///
    /// Each destination is removed first so files dropped upstream do not
    /// survive.
    pub fn mirror_all(&self, repo: &str, source_root: &Path, skills: &[FoundSkill]) -> Result<()> {
        let mirror_dir = self.root.path();
        std::fs::create_dir_all(&mirror_dir).map_err(|e| skill_fs::Error::io(&mirror_dir, e))?;

        let mut seen = HashSet::new();
        for skill in skills {
            if skill.name.is_empty() {
                return Err(Error::EmptySkillName {
                    repo: repo.to_string(),
                });
            }
            if !seen.insert(skill.name.as_str()) {
                return Err(Error::DuplicateSkillName {
                    name: skill.name.clone(),
                    repo: repo.to_string(),
                });
            }

            let src = skill
                .source_path
                .split('/')
                .filter(|s| !s.is_empty() && *s != ".")
                .fold(source_root.to_path_buf(), |acc, s| acc.join(s));
            let dst = self.bundle_dir(&skill.name)?;

            tracing::debug!(
                name = %skill.name,
                from = %src.display(),
                to = %dst.display(),
                "Mirroring skill"
            );
            io::remove_dir_all(&dst)?;
            io::copy_dir(&src, &dst)?;
        }
        Ok(())
    }

    /// Write `skill.meta.json` into the bundle's mirrored directory.
    pub fn write_sidecar(&self, meta: &SkillMeta) -> Result<()> {
        let dir = self.bundle_dir(&meta.name)?;
        meta.save(&dir)?;
        Ok(())
    }
}
