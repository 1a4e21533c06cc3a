//! GitRemote against real local repositories
//!
//! libgit2 treats a plain filesystem path as a remote, so these tests never
//! touch the network.

use std::fs;
use std::path::Path;

use git2::{Commit, Oid, Repository, RepositoryInitOptions, Signature};
use pretty_assertions::assert_eq;
use skill_git::{Error, GitRemote, RevisionSource};
use tempfile::TempDir;

fn init_repo(path: &Path) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    Repository::init_opts(path, &opts).unwrap()
}

fn commit_file(repo: &Repository, rel: &str, content: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    let file = workdir.join(rel);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(rel)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    let parents: Vec<Commit> = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok())
        .into_iter()
        .collect();
    let parent_refs: Vec<&Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, &format!("add {rel}"), &tree, &parent_refs)
        .unwrap()
}

/// Upstream with `main` (one skill) and `dev` (one extra skill).
fn upstream(temp: &TempDir) -> (String, Oid, Oid) {
    let dir = temp.path().join("upstream");
    let repo = init_repo(&dir);
    let main_oid = commit_file(&repo, "skills/alpha/SKILL.md", "# alpha\n");

    let main_commit = repo.find_commit(main_oid).unwrap();
    repo.branch("dev", &main_commit, false).unwrap();
    repo.set_head("refs/heads/dev").unwrap();
    let dev_oid = commit_file(&repo, "skills/beta/SKILL.md", "# beta\n");
    repo.set_head("refs/heads/main").unwrap();

    (dir.to_string_lossy().into_owned(), main_oid, dev_oid)
}

#[test]
fn test_remote_head_default_branch() {
    let temp = TempDir::new().unwrap();
    let (url, main_oid, _) = upstream(&temp);

    let head = GitRemote::new().remote_head(&url, None).unwrap();
    assert_eq!(head, main_oid.to_string());
}

#[test]
fn test_remote_head_named_branch() {
    let temp = TempDir::new().unwrap();
    let (url, _, dev_oid) = upstream(&temp);

    let head = GitRemote::new().remote_head(&url, Some("dev")).unwrap();
    assert_eq!(head, dev_oid.to_string());
}

#[test]
fn test_remote_head_annotated_tag_is_peeled() {
    let temp = TempDir::new().unwrap();
    let (url, main_oid, _) = upstream(&temp);

    let repo = Repository::open(&url).unwrap();
    let target = repo.find_object(main_oid, None).unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    repo.tag("v1.0.0", &target, &sig, "release", false).unwrap();

    let head = GitRemote::new().remote_head(&url, Some("v1.0.0")).unwrap();
    assert_eq!(head, main_oid.to_string());
}

#[test]
fn test_remote_head_unknown_branch_is_empty_head() {
    let temp = TempDir::new().unwrap();
    let (url, _, _) = upstream(&temp);

    let err = GitRemote::new().remote_head(&url, Some("missing")).unwrap_err();
    assert!(matches!(err, Error::EmptyHead { .. }), "got {err:?}");
}

#[test]
fn test_remote_head_unreachable_remote() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does-not-exist");

    let err = GitRemote::new()
        .remote_head(&missing.to_string_lossy(), None)
        .unwrap_err();
    assert!(matches!(err, Error::RemoteHead { .. }), "got {err:?}");
}

#[test]
fn test_fetch_default_branch() {
    let temp = TempDir::new().unwrap();
    let (url, main_oid, _) = upstream(&temp);
    let dest = temp.path().join("sources").join("upstream");

    let head = GitRemote::new().fetch(&url, None, &dest).unwrap();

    assert_eq!(head, main_oid.to_string());
    assert!(dest.join("skills/alpha/SKILL.md").is_file());
    assert!(!dest.join("skills/beta").exists());
}

#[test]
fn test_fetch_branch_detaches_head() {
    let temp = TempDir::new().unwrap();
    let (url, _, dev_oid) = upstream(&temp);
    let dest = temp.path().join("sources").join("upstream");

    let head = GitRemote::new().fetch(&url, Some("dev"), &dest).unwrap();

    assert_eq!(head, dev_oid.to_string());
    assert!(dest.join("skills/beta/SKILL.md").is_file());
    let cloned = Repository::open(&dest).unwrap();
    assert!(cloned.head_detached().unwrap());
}

#[test]
fn test_fetch_replaces_existing_destination() {
    let temp = TempDir::new().unwrap();
    let (url, _, _) = upstream(&temp);
    let dest = temp.path().join("sources").join("upstream");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("leftover.txt"), "stale").unwrap();

    GitRemote::new().fetch(&url, None, &dest).unwrap();

    assert!(!dest.join("leftover.txt").exists());
    assert!(dest.join("skills/alpha/SKILL.md").is_file());
}

#[test]
fn test_fetch_unknown_branch_fails_checkout() {
    let temp = TempDir::new().unwrap();
    let (url, _, _) = upstream(&temp);
    let dest = temp.path().join("sources").join("upstream");

    let err = GitRemote::new()
        .fetch(&url, Some("missing"), &dest)
        .unwrap_err();
    assert!(matches!(err, Error::Checkout { .. }), "got {err:?}");
}
