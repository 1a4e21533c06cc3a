//! Directory pruning rules for the bundle scan

use std::collections::HashSet;

/// Directory names never descended into, matched case-insensitively.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    "coverage",
    ".git",
    ".github",
    ".vscode",
    ".idea",
    ".next",
    ".turbo",
    "vendor",
    "target",
    "tmp",
    "temp",
    "bin",
    "obj",
];

/// Case-folded set of excluded directory names.
///
/// Names starting with `.` are always pruned, whether listed or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeSet {
    names: HashSet<String>,
}

impl ExcludeSet {
    /// Defaults plus `extra`. Extra entries are trimmed; blank ones are dropped.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: HashSet<String> =
            DEFAULT_EXCLUDES.iter().map(|n| n.to_lowercase()).collect();
        for name in extra {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                names.insert(name.to_lowercase());
            }
        }
        Self { names }
    }

    /// Whether a directory with this (base) name should be pruned.
    pub fn should_skip(&self, dir_name: &str) -> bool {
        dir_name.starts_with('.') || self.names.contains(&dir_name.to_lowercase())
    }
}

impl Default for ExcludeSet {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}
