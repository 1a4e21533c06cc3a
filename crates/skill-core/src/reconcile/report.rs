//! Per-run outcome reporting

/// What happened to one declared source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Head unchanged; previous entries reused, sidecars refreshed
    Skipped { skills: usize },
    /// Fetched and scanned; mirror replaced
    Rescanned { skills: usize, removed: usize },
}

/// Report line for one declared source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub repo: String,
    /// Revision the source's entries now record
    pub head: String,
    pub outcome: SourceOutcome,
}

impl SourceReport {
    pub fn skills(&self) -> usize {
        match self.outcome {
            SourceOutcome::Skipped { skills } | SourceOutcome::Rescanned { skills, .. } => skills,
        }
    }

    pub fn was_rescanned(&self) -> bool {
        matches!(self.outcome, SourceOutcome::Rescanned { .. })
    }
}

/// Report from a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// One line per declared source, in declaration order
    pub sources: Vec<SourceReport>,
    /// Whether the entry list or schema marker differs from the previous index
    pub changed: bool,
    /// Whether the index file was written
    pub written: bool,
}

impl ReconcileReport {
    pub fn total_skills(&self) -> usize {
        self.sources.iter().map(SourceReport::skills).sum()
    }

    pub fn rescanned(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| s.was_rescanned())
    }
}
