//! End-to-end reconciliation against real local git repositories
//!
//! These tests exercise the complete flow: sources file -> remote head
//! lookup -> clone -> scan -> mirror -> index, using libgit2 over
//! filesystem remotes.

use pretty_assertions::assert_eq;
use skill_core::{Error, ReconcileOptions, ReconcileReport, Reconciler, sync_index};
use skill_git::GitRemote;
use skill_meta::Source;
use skill_test_utils::tree::skill_md;
use skill_test_utils::{TestWorkspace, UpstreamRepo};

const T1: &str = "2026-03-01T10:00:00Z";
const T2: &str = "2026-03-02T10:00:00Z";

fn run(ws: &TestWorkspace, ts: &str) -> skill_core::Result<ReconcileReport> {
    let options = ReconcileOptions::new(ws.mirror_root(), ws.sources_dir());
    let reconciler = Reconciler::new(GitRemote::new(), options).with_timestamp(ts);
    sync_index(&reconciler, &ws.sources_path(), &ws.index_path())
}

/// Upstream with `foo` and `bar` bundles plus an excluded `node_modules` copy.
fn alpha(ws: &TestWorkspace) -> UpstreamRepo {
    let upstream = UpstreamRepo::init(&ws.upstream_dir("alpha"));
    upstream
        .write("skills/foo/SKILL.md", &skill_md("Foo skill", "1.0.0"))
        .write("skills/foo/scripts/run.sh", "echo foo\n")
        .write("skills/bar/SKILL.md", &skill_md("Bar skill", "0.2.0"))
        .write("node_modules/pkg/SKILL.md", &skill_md("Vendored", "9.9.9"))
        .write("README.md", "# alpha\n");
    upstream.commit("initial");
    upstream
}

// ============================================================================
// Full run
// ============================================================================

#[test]
fn test_first_run_mirrors_every_bundle() {
    let ws = TestWorkspace::new();
    let upstream = alpha(&ws);
    ws.write_sources(&[Source::new(upstream.url())]);

    let report = run(&ws, T1).unwrap();
    assert!(report.changed);
    assert!(report.written);
    assert_eq!(report.total_skills(), 2);

    ws.assert_skill_file("foo", "SKILL.md");
    ws.assert_skill_file("foo", "scripts/run.sh");
    ws.assert_skill_file("bar", "SKILL.md");
    ws.assert_no_skill("pkg");

    let index = ws.read_index();
    assert_eq!(index.generated_at.as_deref(), Some(T1));
    let names: Vec<&str> = index.skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["bar", "foo"]);
    for entry in &index.skills {
        assert_eq!(entry.repo, upstream.url());
        assert_eq!(entry.head, upstream.head());
        assert_eq!(entry.updated_at, T1);
    }

    let meta = ws.read_sidecar("foo");
    assert_eq!(meta.name, "foo");
    assert_eq!(meta.head, Some(upstream.head()));
    assert_eq!(meta.updated_at.as_deref(), Some(T1));
    assert_eq!(meta.description.as_deref(), Some("Foo skill"));
    assert_eq!(meta.version.as_deref(), Some("1.0.0"));

    assert!(!ws.sources_dir().join("alpha").exists());
}

#[test]
fn test_unchanged_head_skips_clone_and_keeps_index_bytes() {
    let ws = TestWorkspace::new();
    let upstream = alpha(&ws);
    ws.write_sources(&[Source::new(upstream.url())]);

    run(&ws, T1).unwrap();
    let first = ws.read_index_raw();

    let report = run(&ws, T2).unwrap();
    assert!(!report.changed);
    assert!(!report.written);
    assert_eq!(report.rescanned().count(), 0);
    assert_eq!(ws.read_index_raw(), first);

    // Sidecars record the check even when nothing was mirrored
    let meta = ws.read_sidecar("foo");
    assert_eq!(meta.updated_at.as_deref(), Some(T1));
    assert_eq!(meta.checked_at.as_deref(), Some(T2));
}

// ============================================================================
// Upstream changes
// ============================================================================

#[test]
fn test_new_commit_removes_stale_bundle_and_updates_heads() {
    let ws = TestWorkspace::new();
    let upstream = alpha(&ws);
    ws.write_sources(&[Source::new(upstream.url())]);
    run(&ws, T1).unwrap();

    upstream
        .remove("skills/bar")
        .write("skills/foo/SKILL.md", &skill_md("Foo skill", "1.1.0"));
    let head = upstream.commit("drop bar, bump foo");

    let report = run(&ws, T2).unwrap();
    assert!(report.changed);
    assert_eq!(report.rescanned().count(), 1);

    ws.assert_no_skill("bar");
    assert_eq!(ws.read_sidecar("foo").version.as_deref(), Some("1.1.0"));

    let index = ws.read_index();
    assert_eq!(index.skills.len(), 1);
    assert_eq!(index.skills[0].head, head);
    assert_eq!(index.skills[0].updated_at, T2);
    assert_eq!(index.generated_at.as_deref(), Some(T2));
}

#[test]
fn test_branch_source_tracks_branch_head() {
    let ws = TestWorkspace::new();
    let upstream = alpha(&ws);
    upstream
        .branch("dev")
        .write("skills/baz/SKILL.md", &skill_md("Baz skill", "0.1.0"));
    let dev_head = upstream.commit("add baz on dev");
    upstream.switch("main");

    ws.write_sources(&[Source::new(upstream.url()).with_branch("dev")]);
    run(&ws, T1).unwrap();

    ws.assert_skill_file("baz", "SKILL.md");
    let index = ws.read_index();
    assert_eq!(index.skills.len(), 3);
    assert!(index.skills.iter().all(|s| s.head == dev_head));
}

#[test]
fn test_tag_source_pins_commit() {
    let ws = TestWorkspace::new();
    let upstream = alpha(&ws);
    let tagged = upstream.head();
    upstream.tag("v1");
    upstream
        .remove("skills/bar")
        .commit("remove bar after tagging");

    ws.write_sources(&[Source::new(upstream.url()).with_branch("v1")]);
    run(&ws, T1).unwrap();

    ws.assert_skill_file("bar", "SKILL.md");
    assert!(ws.read_index().skills.iter().all(|s| s.head == tagged));
}

#[test]
fn test_source_excludes_are_honoured() {
    let ws = TestWorkspace::new();
    let upstream = alpha(&ws);
    upstream.write("drafts/wip/SKILL.md", &skill_md("Work in progress", "0.0.1"));
    upstream.commit("add draft");

    ws.write_sources(&[Source::new(upstream.url()).with_exclude(["Drafts"])]);
    run(&ws, T1).unwrap();

    ws.assert_no_skill("wip");
    assert_eq!(ws.read_index().skills.len(), 2);
}

// ============================================================================
// Failures leave the previous state intact
// ============================================================================

#[test]
fn test_conflicting_bundle_names_across_repos_fail() {
    let ws = TestWorkspace::new();
    let first = alpha(&ws);
    let second = UpstreamRepo::init(&ws.upstream_dir("beta"));
    second.write("foo/SKILL.md", &skill_md("Other foo", "2.0.0"));
    second.commit("initial");

    ws.write_sources(&[Source::new(first.url()), Source::new(second.url())]);
    let err = run(&ws, T1).unwrap_err();
    assert!(matches!(err, Error::PathOwned { .. }), "got {err:?}");
    assert!(!ws.index_path().exists());
}

#[test]
fn test_missing_remote_fails_without_writing_index() {
    let ws = TestWorkspace::new();
    let missing = ws.root().join("nowhere");
    ws.write_sources(&[Source::new(missing.to_string_lossy())]);

    let err = run(&ws, T1).unwrap_err();
    assert!(matches!(err, Error::Git(_)), "got {err:?}");
    assert!(!ws.index_path().exists());
}
