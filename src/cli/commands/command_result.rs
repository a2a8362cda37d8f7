use std::path::PathBuf;

use crate::{
    core::{LanguageVerdict, LibraryFamily, Verdict},
    pipeline::{DecomposeStats, RepairStats, SampleStats},
};

#[derive(Debug)]
pub enum CommandSummary {
    Sample(SampleSummary),
    Classify(ClassifySummary),
    Decompose(DecomposeSummary),
    Repair(RepairSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct SampleSummary {
    pub family: LibraryFamily,
    pub root: PathBuf,
    pub max: Option<usize>,
    pub stats: SampleStats,
}

#[derive(Debug)]
pub struct ClassifySummary {
    pub path: PathBuf,
    pub verdict: Verdict,
    /// Only computed when the structural filter accepted.
    pub language: Option<LanguageVerdict>,
}

impl ClassifySummary {
    pub fn is_accepted(&self) -> bool {
        self.language.as_ref().is_some_and(LanguageVerdict::is_accepted)
    }
}

#[derive(Debug)]
pub struct DecomposeSummary {
    pub output: PathBuf,
    pub stats: DecomposeStats,
}

#[derive(Debug)]
pub struct RepairSummary {
    pub family: LibraryFamily,
    pub output: PathBuf,
    pub stats: RepairStats,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a scenesift command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let error_count = match &summary {
            CommandSummary::Sample(_) => 0,
            CommandSummary::Classify(s) => usize::from(!s.is_accepted()),
            CommandSummary::Decompose(s) => s.stats.failed_files.len(),
            CommandSummary::Repair(s) => s.stats.failed_files.len(),
            CommandSummary::Init(s) => usize::from(!s.created),
        };
        Self {
            summary,
            error_count,
            exit_on_errors: true,
        }
    }
}
