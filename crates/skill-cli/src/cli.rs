//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

use crate::commands::UpdateArgs;

/// Mirror skill bundles from declared source repositories and maintain
/// their provenance index
#[derive(Parser, Debug)]
#[command(name = "skill-indexer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the sources declaration
    #[arg(long, default_value = "sources.skill.json", env = "SKILL_INDEXER_SOURCES")]
    pub sources: PathBuf,

    /// Path to the index file
    #[arg(long, default_value = "index.skill.json", env = "SKILL_INDEXER_INDEX")]
    pub index: PathBuf,

    /// Directory to clone sources into
    #[arg(long, default_value = "sources")]
    pub sources_dir: PathBuf,

    /// Keep cloned repositories after the update
    #[arg(long)]
    pub keep_sources: bool,

    /// Mirror folder name, relative to the working directory
    #[arg(long, default_value = "skill")]
    pub skill_dir: String,

    /// Do not rescan sources whose index entries use the legacy path shape
    #[arg(long)]
    pub no_path_migration: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn update_args(&self) -> UpdateArgs {
        UpdateArgs {
            sources: self.sources.clone(),
            index: self.index.clone(),
            sources_dir: self.sources_dir.clone(),
            keep_sources: self.keep_sources,
            skill_dir: self.skill_dir.clone(),
            path_migration: !self.no_path_migration,
        }
    }
}
