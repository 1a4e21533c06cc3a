//! Bundle scanner
//!
//! Walks a fetched source tree and records every directory holding a marker
//! file. Pruned directories are never descended into.

use std::path::{Component, Path};

use walkdir::WalkDir;

use crate::exclude::ExcludeSet;
use crate::{Error, Result};

/// A bundle located during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundSkill {
    /// Base name of the directory holding the marker
    pub name: String,

    /// That directory relative to the scan root, forward slashes, `.` for
    /// the root itself
    pub source_path: String,
}

impl FoundSkill {
    pub fn new(name: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
        }
    }
}

/// Find every bundle under `root`, sorted by (source path, name).
///
/// The marker file name is matched case-insensitively. The first I/O error
/// aborts the scan. The root itself is never pruned, only directories
/// below it.
pub fn scan(root: &Path, exclude: &ExcludeSet, marker: &str) -> Result<Vec<FoundSkill>> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !exclude.should_skip(&entry.file_name().to_string_lossy())
        });

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| skill_fs::Error::walk(root, e))?;
        if !entry.file_type().is_file()
            || !entry.file_name().to_string_lossy().eq_ignore_ascii_case(marker)
        {
            continue;
        }

        let dir = entry.path().parent().unwrap_or(root);
        let relative = dir.strip_prefix(root).map_err(|_| skill_fs::Error::Walk {
            path: dir.to_path_buf(),
            message: format!("entry escaped scan root {}", root.display()),
        })?;
        let source_path = source_path(relative)?;
        let name = dir
            .file_name()
            .map(|n| {
                n.to_str().map(str::to_string).ok_or_else(|| Error::NonUtf8Path {
                    path: dir.to_path_buf(),
                })
            })
            .transpose()?
            .unwrap_or_default();

        tracing::debug!(name = %name, path = %source_path, "Found skill");
        found.push(FoundSkill { name, source_path });
    }

    found.sort_by(|a, b| {
        (a.source_path.as_str(), a.name.as_str()).cmp(&(b.source_path.as_str(), b.name.as_str()))
    });
    Ok(found)
}

/// Join the components of a scan-relative directory with `/`.
///
/// Only real separators split segments; a `\` inside a Unix file name stays
/// part of that name.
fn source_path(relative: &Path) -> Result<String> {
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| Error::NonUtf8Path {
                    path: relative.to_path_buf(),
                })?;
                segments.push(part);
            }
            Component::CurDir => {}
            _ => {
                return Err(Error::UnsafePath {
                    path: relative.display().to_string(),
                });
            }
        }
    }
    if segments.is_empty() {
        return Ok(".".to_string());
    }
    Ok(segments.join("/"))
}
