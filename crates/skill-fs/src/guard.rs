//! Mirror-root confinement
//!
//! Every destination the engine deletes or writes is expressed relative to
//! the workspace as `<folder>/<bundle>`. [`MirrorRoot::confine`] is the last
//! check before such a path touches the filesystem.

use std::path::{Path, PathBuf};

use crate::{Error, NormalizedPath, Result};

/// The directory mirrored bundles live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRoot {
    /// Directory the relative destinations are resolved against
    base: PathBuf,
    /// Name of the mirror folder directly under `base`
    folder: String,
}

impl MirrorRoot {
    /// Create a mirror root named `folder` inside `base`.
    ///
    /// The folder must be a single plain path segment.
    pub fn new(base: impl Into<PathBuf>, folder: impl Into<String>) -> Result<Self> {
        let folder = folder.into();
        if !is_single_segment(&folder) || folder.contains(':') {
            return Err(Error::InvalidMirrorRoot { name: folder });
        }
        Ok(Self {
            base: base.into(),
            folder,
        })
    }

    /// Name of the mirror folder.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Absolute (or base-relative) path of the mirror folder itself.
    pub fn path(&self) -> PathBuf {
        self.base.join(&self.folder)
    }

    /// Workspace-relative destination for a bundle name, e.g. `skill/foo`.
    ///
    /// The result is not validated; pass it through [`confine`](Self::confine)
    /// before using it for I/O.
    pub fn destination(&self, name: &str) -> String {
        format!("{}/{}", self.folder, name)
    }

    /// Validate a workspace-relative path against the mirror root.
    ///
    /// Returns the cleaned path, or `None` when the path is absolute, climbs
    /// out of the workspace through `..`, does not start with the mirror
    /// folder, or names the mirror folder itself.
    pub fn confine(&self, relative: &str) -> Option<NormalizedPath> {
        let raw = relative.replace('\\', "/");
        if raw.starts_with('/') || NormalizedPath::new(&raw).is_absolute() {
            return None;
        }

        let mut parts: Vec<&str> = Vec::new();
        for part in raw.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    parts.pop()?;
                }
                other => parts.push(other),
            }
        }

        if parts.len() < 2 || parts[0] != self.folder {
            return None;
        }
        Some(NormalizedPath::new(parts.join("/")))
    }

    /// Confine `relative` and resolve it against the base directory.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let clean = self.confine(relative)?;
        Some(clean.segments().fold(self.base.clone(), |acc, s| acc.join(s)))
    }

    /// Resolve the on-disk directory for a bundle name.
    ///
    /// The name must be a single segment: a name containing either separator
    /// would otherwise resolve into some other bundle's directory.
    pub fn bundle_dir(&self, name: &str) -> Option<PathBuf> {
        if !is_single_segment(name) {
            return None;
        }
        self.resolve(&self.destination(name))
    }

    /// The base directory destinations are resolved against.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn root() -> MirrorRoot {
        MirrorRoot::new("/work", "skill").unwrap()
    }

    #[rstest]
    #[case("skill/foo", "skill/foo")]
    #[case("skill/./foo", "skill/foo")]
    #[case("skill//foo/", "skill/foo")]
    #[case("skill/foo/../bar", "skill/bar")]
    #[case("skill\\foo", "skill/foo")]
    fn confine_accepts_paths_inside_root(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(root().confine(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("../../etc")]
    #[case("/etc/passwd")]
    #[case("C:\\Windows")]
    #[case("skill/../../etc")]
    #[case("other/foo")]
    #[case("skill")]
    #[case("skill/.")]
    #[case("skill/..")]
    #[case("")]
    fn confine_rejects_escapes(#[case] input: &str) {
        assert!(root().confine(input).is_none(), "{input:?} must be rejected");
    }

    #[test]
    fn destination_joins_folder_and_name() {
        assert_eq!(root().destination("foo"), "skill/foo");
    }

    #[test]
    fn bundle_dir_resolves_against_base() {
        let dir = root().bundle_dir("foo").unwrap();
        assert_eq!(dir, PathBuf::from("/work").join("skill").join("foo"));
    }

    #[test]
    fn bundle_dir_rejects_traversal_names() {
        assert!(root().bundle_dir("..").is_none());
        assert!(root().bundle_dir("../../etc").is_none());
        assert!(root().bundle_dir(".").is_none());
        assert!(root().bundle_dir("").is_none());
    }

    #[rstest]
    #[case("a/b")]
    #[case("a\\b")]
    #[case("a\\..\\..\\etc")]
    fn bundle_dir_rejects_names_with_separators(#[case] name: &str) {
        assert!(root().bundle_dir(name).is_none(), "{name:?} must be rejected");
    }

    #[test]
    fn bundle_dir_accepts_names_with_other_punctuation() {
        let dir = root().bundle_dir("a:b c").unwrap();
        assert_eq!(dir, PathBuf::from("/work").join("skill").join("a:b c"));
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("a/b")]
    #[case("a\\b")]
    fn new_rejects_non_plain_folder(#[case] folder: &str) {
        assert!(MirrorRoot::new("/work", folder).is_err());
    }
}
