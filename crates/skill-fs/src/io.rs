//! Atomic writes, tree copies and removal helpers

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use walkdir::WalkDir;

use crate::{Error, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// Parent directories are created as needed.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    drop(temp_file);

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read text content, returning `None` when the file does not exist.
pub fn read_text_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Remove a directory tree. A missing directory is not an error.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Remove a directory tree, logging instead of failing.
///
/// Returns whether the path is gone afterwards.
pub fn remove_dir_best_effort(path: &Path) -> bool {
    match remove_dir_all(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove directory");
            false
        }
    }
}

/// Copy the directory tree at `src` to `dst`, preserving permission bits.
///
/// `dst` is created if needed; existing files inside it are overwritten but
/// nothing is deleted. Directory permissions are applied after the contents
/// are in place so read-only source directories can still be copied.
/// Symlinks to files are copied as regular files; other symlinks are skipped.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    let root_meta = fs::metadata(src).map_err(|e| Error::io(src, e))?;
    if !root_meta.is_dir() {
        return Err(Error::NotADirectory {
            path: src.to_path_buf(),
        });
    }
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    let mut dirs: Vec<(PathBuf, fs::Permissions)> = vec![(dst.to_path_buf(), root_meta.permissions())];

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::walk(src, e))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| Error::Walk {
                path: entry.path().to_path_buf(),
                message: format!("entry escaped copy root {}", src.display()),
            })?;
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            let meta = entry.metadata().map_err(|e| Error::walk(src, e))?;
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
            dirs.push((target, meta.permissions()));
        } else if file_type.is_file() {
            copy_file(entry.path(), &target)?;
        } else if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => copy_file(entry.path(), &target)?,
                _ => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        "Skipping symlink that does not point to a regular file"
                    );
                }
            }
        }
    }

    for (dir, permissions) in dirs.into_iter().rev() {
        fs::set_permissions(&dir, permissions).map_err(|e| Error::io(&dir, e))?;
    }
    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    // fs::copy carries the permission bits over
    fs::copy(src, dst).map_err(|e| Error::io(src, e))?;
    Ok(())
}
