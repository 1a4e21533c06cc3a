//! Helpers for laying out skill bundles on disk.

use std::fs;
use std::path::Path;

/// Write `content` to `root/rel`, creating parent directories.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("write_file: mkdir {}: {e}", parent.display()));
    }
    fs::write(&path, content).unwrap_or_else(|e| panic!("write_file: {}: {e}", path.display()));
}

/// Marker file content with a delimited header.
pub fn skill_md(description: &str, version: &str) -> String {
    format!("---\nname: fixture\ndescription: {description}\nversion: \"{version}\"\n---\n\n# Fixture skill\n")
}

/// Write a `SKILL.md` bundle marker into `root/dir`.
pub fn write_skill(root: &Path, dir: &str, description: &str, version: &str) {
    write_file(root, &format!("{dir}/SKILL.md"), &skill_md(description, version));
}
