//! Revision source trait

use std::path::Path;

use crate::Result;

/// Resolves remote revisions and produces working copies of a repository.
///
/// `branch` is `None` for the remote's default branch. Both operations are
/// attempted exactly once; there is no retry layer.
pub trait RevisionSource {
    /// Current head revision advertised by the remote for `branch`.
    ///
    /// An empty result is an error, never `Ok("")`.
    fn remote_head(&self, repo: &str, branch: Option<&str>) -> Result<String>;

    /// Produce a working copy of `repo` at `branch` in `dest`.
    ///
    /// Anything already at `dest` is replaced. Returns the revision that was
    /// actually checked out, which may differ from an earlier
    /// [`remote_head`](Self::remote_head) answer if the branch moved.
    fn fetch(&self, repo: &str, branch: Option<&str>, dest: &Path) -> Result<String>;
}

impl<T: RevisionSource + ?Sized> RevisionSource for &T {
    fn remote_head(&self, repo: &str, branch: Option<&str>) -> Result<String> {
        (**self).remote_head(repo, branch)
    }

    fn fetch(&self, repo: &str, branch: Option<&str>, dest: &Path) -> Result<String> {
        (**self).fetch(repo, branch, dest)
    }
}
