//! Reconciler implementation
//!
//! Sources are processed strictly in declaration order. State shared across
//! sources (destination owners, accumulated entries) lives in a [`RunState`]
//! created fresh for each call to [`Reconciler::reconcile`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use skill_git::{RevisionSource, repo_folder_name};
use skill_meta::{IndexFile, SkillEntry, SkillMeta, SourcesFile};

use super::options::ReconcileOptions;
use super::owners::OwnerMap;
use super::report::{ReconcileReport, SourceOutcome, SourceReport};
use super::scratch::ScratchDir;
use crate::exclude::ExcludeSet;
use crate::mirror::MirrorWriter;
use crate::scanner::{FoundSkill, scan};
use crate::{Error, Result, frontmatter};

/// Current UTC time as RFC 3339 with second precision (`2026-01-02T03:04:05Z`).
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Whether any entry still records its mirror destination as its path.
///
/// Such entries were written by an older generation of the index and are
/// rescanned so they pick up their real source-relative path.
pub fn needs_path_migration<'e, I>(entries: I, options: &ReconcileOptions) -> bool
where
    I: IntoIterator<Item = &'e SkillEntry>,
{
    entries
        .into_iter()
        .filter(|e| !e.name.is_empty())
        .any(|e| e.path == options.mirror.destination(&e.name))
}

/// Result of [`Reconciler::reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The index to persist if `report.changed` is set
    pub index: IndexFile,
    pub report: ReconcileReport,
}

/// A declared source after run-wide validation.
#[derive(Debug, Clone)]
struct PlannedSource {
    repo: String,
    branch: Option<String>,
    exclude: Vec<String>,
    folder: String,
}

/// Accumulator threaded through the per-source loop.
#[derive(Debug, Default)]
struct RunState {
    owners: OwnerMap,
    entries: Vec<SkillEntry>,
    reports: Vec<SourceReport>,
}

/// Drives one reconciliation run.
pub struct Reconciler<R> {
    remote: R,
    options: ReconcileOptions,
    /// Shared by every entry and sidecar written in the run
    timestamp: String,
}

impl<R: RevisionSource> Reconciler<R> {
    pub fn new(remote: R, options: ReconcileOptions) -> Self {
        Self {
            remote,
            options,
            timestamp: timestamp_now(),
        }
    }

    /// Override the run timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Compute the new index from the declared sources and the previous index.
    ///
    /// Mirror directories and sidecars are updated as a side effect. Any error
    /// aborts the run; sources finished before the failure keep their mirror
    /// changes.
    pub fn reconcile(&self, sources: &SourcesFile, previous: &IndexFile) -> Result<Reconciliation> {
        let plan = plan_sources(sources)?;
        let mut state = RunState::default();

        for source in &plan {
            self.reconcile_source(source, previous, &mut state)?;
        }

        let mut index = IndexFile {
            schema: previous.schema.clone(),
            generated_at: previous.generated_at.clone(),
            skills: state.entries,
        };
        index.sort();

        let changed = index.skills != previous.skills || index.schema != previous.schema;
        if changed {
            index.generated_at = Some(self.timestamp.clone());
        }

        Ok(Reconciliation {
            index,
            report: ReconcileReport {
                sources: state.reports,
                changed,
                written: false,
            },
        })
    }

    fn reconcile_source(
        &self,
        source: &PlannedSource,
        previous: &IndexFile,
        state: &mut RunState,
    ) -> Result<()> {
        let repo = source.repo.as_str();
        let head = self.remote.remote_head(repo, source.branch.as_deref())?;
        let head = head.trim();
        if head.is_empty() {
            return Err(Error::EmptyHead {
                repo: repo.to_string(),
            });
        }

        let old: Vec<&SkillEntry> = previous.entries_for(repo).collect();
        let report = if self.can_reuse(repo, head, previous, &old, &state.owners) {
            self.reuse(repo, head, &old, state)?
        } else {
            self.rescan(source, &old, state)?
        };

        tracing::info!(
            repo,
            head = %report.head,
            skills = report.skills(),
            rescanned = report.was_rescanned(),
            "Reconciled source"
        );
        state.reports.push(report);
        Ok(())
    }

    /// Fast path preconditions: same head, no pending path migration, every
    /// mirrored directory still present and not claimed by another source.
    fn can_reuse(
        &self,
        repo: &str,
        head: &str,
        previous: &IndexFile,
        old: &[&SkillEntry],
        owners: &OwnerMap,
    ) -> bool {
        if previous.head_for(repo) != Some(head) {
            return false;
        }
        if self.options.path_migration && needs_path_migration(old.iter().copied(), &self.options) {
            tracing::info!(repo, "Index paths need migration, rescanning");
            return false;
        }
        old.iter().all(|entry| {
            let Some(dir) = self.options.mirror.bundle_dir(&entry.name) else {
                return false;
            };
            let destination = self.options.mirror.destination(&entry.name);
            dir.is_dir() && owners.is_available(&destination, repo)
        })
    }

    fn reuse(
        &self,
        repo: &str,
        head: &str,
        old: &[&SkillEntry],
        state: &mut RunState,
    ) -> Result<SourceReport> {
        let writer = MirrorWriter::new(&self.options.mirror);
        for entry in old {
            state
                .owners
                .claim(&self.options.mirror.destination(&entry.name), repo)?;
            state.entries.push((*entry).clone());

            let mut meta = SkillMeta {
                head: Some(entry.head.clone()),
                updated_at: Some(entry.updated_at.clone()),
                checked_at: Some(self.timestamp.clone()),
                ..SkillMeta::new(entry.name.clone())
            };
            self.write_sidecar(&writer, &mut meta)?;
        }

        Ok(SourceReport {
            repo: repo.to_string(),
            head: head.to_string(),
            outcome: SourceOutcome::Skipped { skills: old.len() },
        })
    }

    fn rescan(
        &self,
        source: &PlannedSource,
        old: &[&SkillEntry],
        state: &mut RunState,
    ) -> Result<SourceReport> {
        let repo = source.repo.as_str();
        let scratch = ScratchDir::new(
            self.options.sources_dir.join(&source.folder),
            self.options.keep_sources,
        );

        tracing::info!(repo, dest = %scratch.path().display(), "Fetching source");
        let fetched = self
            .remote
            .fetch(repo, source.branch.as_deref(), scratch.path())?;
        let head = fetched.trim().to_string();
        if head.is_empty() {
            return Err(Error::EmptyHead {
                repo: repo.to_string(),
            });
        }

        let exclude = ExcludeSet::new(&source.exclude);
        let found = scan(scratch.path(), &exclude, &self.options.marker)?;
        self.validate(repo, &found, &state.owners)?;

        // A destination already claimed by an earlier source this run now
        // holds that source's copy and must not be deleted
        let stale = old.iter().copied().filter(|entry| {
            state
                .owners
                .is_available(&self.options.mirror.destination(&entry.name), repo)
        });
        let writer = MirrorWriter::new(&self.options.mirror);
        let removed = writer.remove_owned(stale)?;
        writer.mirror_all(repo, scratch.path(), &found)?;

        for skill in &found {
            state
                .owners
                .claim(&self.options.mirror.destination(&skill.name), repo)?;
            state.entries.push(SkillEntry {
                name: skill.name.clone(),
                path: skill.source_path.clone(),
                repo: repo.to_string(),
                head: head.clone(),
                updated_at: self.timestamp.clone(),
            });

            let mut meta = SkillMeta {
                head: Some(head.clone()),
                updated_at: Some(self.timestamp.clone()),
                checked_at: Some(self.timestamp.clone()),
                ..SkillMeta::new(skill.name.clone())
            };
            self.write_sidecar(&writer, &mut meta)?;
        }

        Ok(SourceReport {
            repo: repo.to_string(),
            head,
            outcome: SourceOutcome::Rescanned {
                skills: found.len(),
                removed,
            },
        })
    }

    /// Reject empty, duplicate, unsafe or foreign-owned bundle names before
    /// anything on disk is touched.
    fn validate(&self, repo: &str, found: &[FoundSkill], owners: &OwnerMap) -> Result<()> {
        let mut seen = HashSet::new();
        for skill in found {
            if skill.name.is_empty() {
                return Err(Error::EmptySkillName {
                    repo: repo.to_string(),
                });
            }
            if !seen.insert(skill.name.as_str()) {
                return Err(Error::DuplicateSkillName {
                    name: skill.name.clone(),
                    repo: repo.to_string(),
                });
            }
            let destination = self.options.mirror.destination(&skill.name);
            if self.options.mirror.bundle_dir(&skill.name).is_none() {
                return Err(Error::UnsafePath { path: destination });
            }
            owners.check(&destination, repo)?;
        }
        Ok(())
    }

    fn write_sidecar(&self, writer: &MirrorWriter<'_>, meta: &mut SkillMeta) -> Result<()> {
        let dir = writer.bundle_dir(&meta.name)?;
        frontmatter::enrich(&dir, &self.options.marker, meta)?;
        writer.write_sidecar(meta)
    }
}

/// Validate the whole declaration before the first remote call.
fn plan_sources(sources: &SourcesFile) -> Result<Vec<PlannedSource>> {
    if sources.sources.is_empty() {
        return Err(Error::NoSources);
    }
    let mut seen_repos = HashSet::new();
    let mut folders: HashMap<String, String> = HashMap::new();
    let mut plan = Vec::with_capacity(sources.sources.len());

    for source in &sources.sources {
        let repo = source.repo.trim();
        if repo.is_empty() {
            return Err(Error::EmptyRepo);
        }
        if !seen_repos.insert(repo) {
            return Err(Error::DuplicateRepo {
                repo: repo.to_string(),
            });
        }

        let folder = repo_folder_name(repo);
        if folder.is_empty() {
            return Err(Error::UnderivableFolderName {
                repo: repo.to_string(),
            });
        }
        if let Some(first) = folders.get(&folder) {
            return Err(Error::FolderNameCollision {
                name: folder,
                first: first.clone(),
                second: repo.to_string(),
            });
        }
        folders.insert(folder.clone(), repo.to_string());

        plan.push(PlannedSource {
            repo: repo.to_string(),
            branch: source.branch().map(str::to_string),
            exclude: source.exclude.clone(),
            folder,
        });
    }
    Ok(plan)
}

/// Load both documents, reconcile, and write the index only when its content
/// changed.
pub fn sync_index<R: RevisionSource>(
    reconciler: &Reconciler<R>,
    sources_path: &Path,
    index_path: &Path,
) -> Result<ReconcileReport> {
    let sources = SourcesFile::load(sources_path)?;
    let previous = IndexFile::load_or_default(index_path)?;

    let Reconciliation { index, mut report } = reconciler.reconcile(&sources, &previous)?;

    if report.changed {
        index.save(index_path)?;
        report.written = true;
        tracing::info!(path = %index_path.display(), skills = index.skills.len(), "Wrote index");
    } else {
        tracing::info!(path = %index_path.display(), "Index unchanged");
    }
    Ok(report)
}
