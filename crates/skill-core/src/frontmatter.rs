//! Best-effort `description` / `version` extraction from a marker file
//!
//! A file opening with a `---` line has its header read up to the next `---`
//! line. Anything else (or an unterminated block) falls back to the first
//! [`FALLBACK_LINES`] lines.

use std::path::{Path, PathBuf};

use skill_fs::io;
use skill_meta::SkillMeta;

use crate::Result;

/// Lines scanned when the file has no delimited header block.
pub const FALLBACK_LINES: usize = 40;

/// Fields pulled from a marker header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub description: Option<String>,
    pub version: Option<String>,
}

/// Parse the header region of a marker file.
///
/// Keys are matched case-insensitively; the first non-empty value for each
/// key wins.
pub fn parse(content: &str) -> Frontmatter {
    let lines: Vec<&str> = content.split('\n').collect();
    let header = delimited_block(&lines)
        .unwrap_or_else(|| &lines[..lines.len().min(FALLBACK_LINES)]);

    let mut fm = Frontmatter::default();
    for line in header {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(value) = strip_key(line, "description:") {
            if fm.description.is_none() {
                fm.description = non_empty(trim_quoted(value));
            }
            continue;
        }
        if let Some(value) = strip_key(line, "version:") {
            if fm.version.is_none() {
                fm.version = non_empty(trim_quoted(value));
            }
        }
    }
    fm
}

/// Fill `meta.description` and `meta.version` from the marker in `bundle_dir`.
///
/// A missing marker leaves both fields empty. Other read failures propagate.
pub fn enrich(bundle_dir: &Path, marker: &str, meta: &mut SkillMeta) -> Result<()> {
    let content = match find_marker(bundle_dir, marker)? {
        Some(path) => io::read_text_if_exists(&path)?,
        None => None,
    };
    let fm = content.as_deref().map(parse).unwrap_or_default();
    meta.description = fm.description;
    meta.version = fm.version;
    Ok(())
}

fn delimited_block<'a>(lines: &'a [&'a str]) -> Option<&'a [&'a str]> {
    if lines.first()?.trim() != "---" {
        return None;
    }
    let end = lines.iter().skip(1).position(|l| l.trim() == "---")? + 1;
    Some(&lines[1..end])
}

fn strip_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let head = line.get(..key.len())?;
    head.eq_ignore_ascii_case(key).then(|| &line[key.len()..])
}

fn trim_quoted(value: &str) -> &str {
    let value = value.trim();
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// `<bundle_dir>/<marker>`, or the first entry matching it case-insensitively.
fn find_marker(bundle_dir: &Path, marker: &str) -> Result<Option<PathBuf>> {
    let exact = bundle_dir.join(marker);
    if exact.is_file() {
        return Ok(Some(exact));
    }

    let entries = match std::fs::read_dir(bundle_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(skill_fs::Error::io(bundle_dir, e).into()),
    };
    for entry in entries {
        let entry = entry.map_err(|e| skill_fs::Error::io(bundle_dir, e))?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().eq_ignore_ascii_case(marker) && path.is_file() {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
