//! libgit2-backed revision source

use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{Direction, Remote, Repository};

use crate::{Error, Result, RevisionSource};

/// Talks to real git remotes (URLs or local paths) through libgit2.
///
/// Connections are anonymous. Clones are full clones of the default branch;
/// a requested branch or tag is then checked out with HEAD detached.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitRemote;

impl GitRemote {
    pub fn new() -> Self {
        Self
    }
}

impl RevisionSource for GitRemote {
    fn remote_head(&self, repo: &str, branch: Option<&str>) -> Result<String> {
        let reference = branch.unwrap_or("HEAD");
        let ls_error = |e: git2::Error| Error::RemoteHead {
            repo: repo.to_string(),
            reference: reference.to_string(),
            message: e.message().to_string(),
        };

        let mut remote = Remote::create_detached(repo).map_err(ls_error)?;
        remote.connect(Direction::Fetch).map_err(ls_error)?;

        let advertised: Vec<(String, String)> = remote
            .list()
            .map_err(ls_error)?
            .iter()
            .map(|head| (head.name().to_string(), head.oid().to_string()))
            .collect();
        // Disconnect failures do not affect the answer
        let _ = remote.disconnect();

        tracing::debug!(repo, reference, refs = advertised.len(), "Listed remote refs");

        let head = match branch {
            None => find_ref(&advertised, "HEAD"),
            Some(b) => find_ref(&advertised, &format!("refs/heads/{b}"))
                .or_else(|| find_ref(&advertised, &format!("refs/tags/{b}^{{}}")))
                .or_else(|| find_ref(&advertised, &format!("refs/tags/{b}")))
                .or_else(|| find_ref(&advertised, b)),
        };

        match head {
            Some(oid) if !oid.is_empty() => Ok(oid.to_string()),
            _ => Err(Error::EmptyHead {
                repo: repo.to_string(),
                reference: reference.to_string(),
            }),
        }
    }

    fn fetch(&self, repo: &str, branch: Option<&str>, dest: &Path) -> Result<String> {
        skill_fs::io::remove_dir_all(dest)?;
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| skill_fs::Error::io(parent, e))?;
        }

        tracing::debug!(repo, dest = %dest.display(), "Cloning source repository");
        let cloned = RepoBuilder::new()
            .clone(repo, dest)
            .map_err(|e| Error::Clone {
                url: repo.to_string(),
                message: e.message().to_string(),
            })?;

        if let Some(reference) = branch {
            checkout_detached(&cloned, repo, reference)?;
        }

        let commit = cloned.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }
}

fn find_ref<'a>(advertised: &'a [(String, String)], name: &str) -> Option<&'a str> {
    advertised
        .iter()
        .find(|(ref_name, _)| ref_name == name)
        .map(|(_, oid)| oid.as_str())
}

/// Check out `origin/<reference>` (a branch) or `<reference>` (a tag or
/// commit) and detach HEAD at it.
fn checkout_detached(repo: &Repository, url: &str, reference: &str) -> Result<()> {
    let checkout_error = |message: String| Error::Checkout {
        url: url.to_string(),
        reference: reference.to_string(),
        message,
    };

    let object = repo
        .revparse_single(&format!("origin/{reference}"))
        .or_else(|_| repo.revparse_single(reference))
        .map_err(|e| checkout_error(e.message().to_string()))?;
    let commit = object
        .peel_to_commit()
        .map_err(|e| checkout_error(e.message().to_string()))?;

    let mut opts = CheckoutBuilder::new();
    opts.force();
    repo.checkout_tree(commit.as_object(), Some(&mut opts))
        .map_err(|e| checkout_error(format!("Failed to checkout: {}", e)))?;
    repo.set_head_detached(commit.id())
        .map_err(|e| checkout_error(format!("Failed to set HEAD: {}", e)))?;
    Ok(())
}
