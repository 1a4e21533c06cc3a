//! The update run: reconcile every declared source and rewrite the index

use std::path::{Path, PathBuf};

use colored::Colorize;

use skill_core::{ReconcileOptions, ReconcileReport, Reconciler, SourceOutcome, sync_index};
use skill_fs::MirrorRoot;
use skill_git::GitRemote;

use crate::error::Result;

/// Resolved command-line options for an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateArgs {
    pub sources: PathBuf,
    pub index: PathBuf,
    pub sources_dir: PathBuf,
    pub keep_sources: bool,
    pub skill_dir: String,
    pub path_migration: bool,
}

/// Run the update against real git remotes.
///
/// Relative paths are resolved against `cwd`; the mirror folder lives
/// directly inside it.
pub fn run_update(cwd: &Path, args: &UpdateArgs) -> Result<()> {
    println!("{} Updating skills from {}", "=>".blue().bold(), args.sources.display());

    let mirror = MirrorRoot::new(cwd, args.skill_dir.as_str())?;
    let options = ReconcileOptions::new(mirror, cwd.join(&args.sources_dir))
        .with_keep_sources(args.keep_sources)
        .with_path_migration(args.path_migration);
    let reconciler = Reconciler::new(GitRemote::new(), options);

    let report = sync_index(&reconciler, &cwd.join(&args.sources), &cwd.join(&args.index))?;
    print_report(&report, &args.index);
    Ok(())
}

fn print_report(report: &ReconcileReport, index: &Path) {
    for source in &report.sources {
        let head = short_head(&source.head);
        match source.outcome {
            SourceOutcome::Skipped { skills } => println!(
                "   {} {} @ {} ({} skills, unchanged)",
                "-".dimmed(),
                source.repo.cyan(),
                head.dimmed(),
                skills
            ),
            SourceOutcome::Rescanned { skills, removed } => println!(
                "   {} {} @ {} ({} skills mirrored, {} removed)",
                "+".green(),
                source.repo.cyan(),
                head.yellow(),
                skills,
                removed
            ),
        }
    }

    if report.written {
        println!(
            "{} Wrote {} ({} skills)",
            "OK".green().bold(),
            index.display(),
            report.total_skills()
        );
    } else {
        println!("{} Index is up to date.", "OK".green().bold());
    }
}

fn short_head(head: &str) -> &str {
    head.get(..12).unwrap_or(head)
}
