//! Repository identifier to directory name mapping

/// Derive the local working-directory name for a repository identifier.
///
/// Handles plain paths, `scheme://host/owner/name(.git)` URLs and scp-style
/// `git@host:owner/name(.git)` remotes. Returns an empty string when nothing
/// usable is left; callers treat that as a configuration error.
///
/// `https://github.com/acme/skills.git` -> `skills`
pub fn repo_folder_name(repo: &str) -> String {
    let mut rest = trim_suffixes(repo.trim());

    if rest.starts_with("git@") {
        if let Some(idx) = rest.rfind(':') {
            rest = &rest[idx + 1..];
        }
    }
    if let Some(idx) = rest.find("://") {
        rest = &rest[idx + 3..];
        // Drop the host
        if let Some(slash) = rest.find('/') {
            rest = &rest[slash + 1..];
        }
    }

    let rest = trim_suffixes(rest).replace('\\', "/");
    rest.rsplit('/').next().unwrap_or_default().to_string()
}

fn trim_suffixes(repo: &str) -> &str {
    let repo = repo.strip_suffix('/').unwrap_or(repo);
    repo.strip_suffix(".git").unwrap_or(repo)
}
