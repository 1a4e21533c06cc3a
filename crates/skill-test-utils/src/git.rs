//! Real upstream repositories for end-to-end tests.
//!
//! libgit2 accepts a filesystem path as a remote URL, so an [`UpstreamRepo`]
//! can be declared as a source directly.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Commit, IndexAddOption, Repository, RepositoryInitOptions, Signature};

/// A non-bare repository with `main` as its initial branch.
///
/// # Panics
/// Every method panics on failure; these are test fixtures.
pub struct UpstreamRepo {
    path: PathBuf,
    repo: Repository,
}

impl UpstreamRepo {
    /// Initialise a repository at `path` (created if missing).
    pub fn init(path: &Path) -> Self {
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(path, &opts).unwrap_or_else(|e| {
            panic!("UpstreamRepo::init: failed at {}: {e}", path.display())
        });
        Self {
            path: path.to_path_buf(),
            repo,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The identifier to declare in a sources file.
    pub fn url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Write a file in the working tree.
    pub fn write(&self, rel: &str, content: &str) -> &Self {
        let file = self.path.join(rel);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("UpstreamRepo::write: mkdir {}: {e}", parent.display()));
        }
        fs::write(&file, content)
            .unwrap_or_else(|e| panic!("UpstreamRepo::write: {}: {e}", file.display()));
        self
    }

    /// Delete a file or directory from the working tree.
    pub fn remove(&self, rel: &str) -> &Self {
        let target = self.path.join(rel);
        let result = if target.is_dir() {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_file(&target)
        };
        result.unwrap_or_else(|e| panic!("UpstreamRepo::remove: {}: {e}", target.display()));
        self
    }

    /// Stage every change (including deletions) and commit on the current
    /// branch. Returns the new commit id.
    pub fn commit(&self, message: &str) -> String {
        let mut index = self.repo.index().expect("UpstreamRepo::commit: index");
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .expect("UpstreamRepo::commit: add_all");
        index
            .update_all(["*"], None)
            .expect("UpstreamRepo::commit: update_all");
        index.write().expect("UpstreamRepo::commit: write index");

        let tree_id = index.write_tree().expect("UpstreamRepo::commit: write tree");
        let tree = self.repo.find_tree(tree_id).expect("UpstreamRepo::commit: find tree");
        let sig = Signature::now("Test User", "test@test.com").expect("UpstreamRepo::commit: signature");

        let parents: Vec<Commit> = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("UpstreamRepo::commit: commit")
            .to_string()
    }

    /// Create a branch at the current HEAD and switch to it.
    pub fn branch(&self, name: &str) -> &Self {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("UpstreamRepo::branch: HEAD has no commit");
        self.repo
            .branch(name, &head, false)
            .unwrap_or_else(|e| panic!("UpstreamRepo::branch: {name}: {e}"));
        self.switch(name)
    }

    /// Switch to an existing branch, updating the working tree.
    pub fn switch(&self, name: &str) -> &Self {
        let refname = format!("refs/heads/{name}");
        let object = self
            .repo
            .revparse_single(&refname)
            .unwrap_or_else(|e| panic!("UpstreamRepo::switch: {name}: {e}"));
        let mut opts = git2::build::CheckoutBuilder::new();
        opts.force().remove_untracked(true);
        self.repo
            .checkout_tree(&object, Some(&mut opts))
            .unwrap_or_else(|e| panic!("UpstreamRepo::switch: checkout {name}: {e}"));
        self.repo
            .set_head(&refname)
            .unwrap_or_else(|e| panic!("UpstreamRepo::switch: set_head {name}: {e}"));
        self
    }

    /// Lightweight tag at HEAD.
    pub fn tag(&self, name: &str) -> &Self {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel(git2::ObjectType::Commit))
            .expect("UpstreamRepo::tag: HEAD has no commit");
        self.repo
            .tag_lightweight(name, &head, false)
            .unwrap_or_else(|e| panic!("UpstreamRepo::tag: {name}: {e}"));
        self
    }

    /// Current HEAD commit id.
    pub fn head(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.id().to_string())
            .expect("UpstreamRepo::head: HEAD has no commit")
    }
}
