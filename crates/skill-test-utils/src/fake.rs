//! In-memory revision source.
//!
//! [`FakeRemote`] serves heads from a table and "fetches" by copying a
//! prepared directory tree, recording every call so tests can assert that a
//! source was (or was not) fetched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use skill_git::{Error, Result, RevisionSource};

/// One call made against a [`FakeRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    RemoteHead {
        repo: String,
        branch: Option<String>,
    },
    Fetch {
        repo: String,
        branch: Option<String>,
        dest: PathBuf,
    },
}

#[derive(Debug, Clone)]
struct FakeRepo {
    head: String,
    /// Head reported by `fetch`, when it differs from `head`
    fetched_head: Option<String>,
    tree: PathBuf,
}

/// Revision source backed by local directory trees.
#[derive(Debug, Default)]
pub struct FakeRemote {
    repos: Mutex<HashMap<String, FakeRepo>>,
    calls: Mutex<Vec<RemoteCall>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `repo` at `head`, fetching copies of `tree`.
    pub fn add(&self, repo: &str, head: &str, tree: impl Into<PathBuf>) -> &Self {
        self.repos.lock().unwrap().insert(
            repo.to_string(),
            FakeRepo {
                head: head.to_string(),
                fetched_head: None,
                tree: tree.into(),
            },
        );
        self
    }

    /// Move `repo` to a new head.
    pub fn set_head(&self, repo: &str, head: &str) -> &Self {
        let mut repos = self.repos.lock().unwrap();
        let entry = repos
            .get_mut(repo)
            .unwrap_or_else(|| panic!("FakeRemote::set_head: unknown repo {repo}"));
        entry.head = head.to_string();
        entry.fetched_head = None;
        self
    }

    /// Make `fetch` report a different head than `remote_head`, as when a
    /// branch moves between the two calls.
    pub fn set_fetched_head(&self, repo: &str, head: &str) -> &Self {
        let mut repos = self.repos.lock().unwrap();
        let entry = repos
            .get_mut(repo)
            .unwrap_or_else(|| panic!("FakeRemote::set_fetched_head: unknown repo {repo}"));
        entry.fetched_head = Some(head.to_string());
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Repositories fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                RemoteCall::Fetch { repo, .. } => Some(repo.clone()),
                RemoteCall::RemoteHead { .. } => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn lookup(&self, repo: &str, branch: Option<&str>) -> Result<FakeRepo> {
        self.repos
            .lock()
            .unwrap()
            .get(repo)
            .cloned()
            .ok_or_else(|| Error::RemoteHead {
                repo: repo.to_string(),
                reference: branch.unwrap_or("HEAD").to_string(),
                message: "repository not found".to_string(),
            })
    }
}

impl RevisionSource for FakeRemote {
    fn remote_head(&self, repo: &str, branch: Option<&str>) -> Result<String> {
        self.calls.lock().unwrap().push(RemoteCall::RemoteHead {
            repo: repo.to_string(),
            branch: branch.map(str::to_string),
        });
        Ok(self.lookup(repo, branch)?.head)
    }

    fn fetch(&self, repo: &str, branch: Option<&str>, dest: &Path) -> Result<String> {
        self.calls.lock().unwrap().push(RemoteCall::Fetch {
            repo: repo.to_string(),
            branch: branch.map(str::to_string),
            dest: dest.to_path_buf(),
        });
        let fake = self.lookup(repo, branch)?;
        skill_fs::io::remove_dir_all(dest)?;
        skill_fs::io::copy_dir(&fake.tree, dest)?;
        Ok(fake.fetched_head.unwrap_or(fake.head))
    }
}
