//! LLM repair of stored samples.
//!
//! Every sample of a family is sent to the model with a family-specific
//! prompt asking for a compilable, self-contained rewrite. Files longer than
//! the line cutoff are left alone. Work is spread over a fixed-size pool.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use rayon::{ThreadPoolBuilder, prelude::*};
use tracing::{info, warn};

use super::{collect_files, file_stem};
use crate::{
    config::RepairConfig,
    core::LibraryFamily,
    llm::{LlmClient, TokenUsage, generate_code, prompts},
    store::write_atomic,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOptions {
    pub max_lines: usize,
    pub workers: usize,
}

impl From<&RepairConfig> for RepairOptions {
    fn from(config: &RepairConfig) -> Self {
        Self {
            max_lines: config.max_lines,
            workers: config.workers,
        }
    }
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self::from(&RepairConfig::default())
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    Repaired { output: PathBuf, usage: TokenUsage },
    TooLong { lines: usize },
    /// The model answered with nothing usable.
    Empty { usage: TokenUsage },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairStats {
    pub files: usize,
    pub repaired: usize,
    pub too_long: usize,
    pub empty: usize,
    pub failed_files: Vec<PathBuf>,
    pub usage: TokenUsage,
    pub elapsed: Duration,
}

/// `<root>/<family>_fixed`.
pub fn default_output_dir(root: &Path, family: LibraryFamily) -> PathBuf {
    root.join(format!("{}_fixed", family.name()))
}

/// Fails for families without a repair prompt.
pub fn ensure_repairable(family: LibraryFamily) -> Result<()> {
    if !prompts::REPAIRABLE.contains(&family) {
        bail!(
            "Repair is not available for '{}'. Choose from: {}",
            family,
            prompts::REPAIRABLE
                .iter()
                .map(|f| f.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}

pub fn repair_file<C: LlmClient + ?Sized>(
    client: &C,
    family: LibraryFamily,
    path: &Path,
    output_dir: &Path,
    max_lines: usize,
) -> Result<RepairOutcome> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let lines = source.lines().count();
    if lines > max_lines {
        info!("{}: skipped, {} lines exceeds {}", path.display(), lines, max_lines);
        return Ok(RepairOutcome::TooLong { lines });
    }

    let stem = file_stem(path);
    let Some(prompt) = prompts::repair(family, &stem, &source) else {
        bail!("No repair prompt for family '{}'", family);
    };
    let (code, usage) = generate_code(client, &prompt)?;
    if code.is_empty() {
        warn!("{}: model returned no code", path.display());
        return Ok(RepairOutcome::Empty { usage });
    }

    let output = output_dir.join(format!("{}.{}", stem, family.extension()));
    write_atomic(&output, &code)?;
    info!("revised code written to {}", output.display());
    Ok(RepairOutcome::Repaired { output, usage })
}

/// Repair every sample of `family` under `input_dir` using `options.workers` threads.
pub fn repair_dir<C: LlmClient>(
    client: &C,
    family: LibraryFamily,
    input_dir: &Path,
    output_dir: &Path,
    options: RepairOptions,
) -> Result<RepairStats> {
    ensure_repairable(family)?;

    let start = Instant::now();
    let files = collect_files(input_dir, family.extension())?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(options.workers.max(1))
        .build()
        .context("Failed to start worker pool")?;

    let results: Vec<_> = pool.install(|| {
        files
            .par_iter()
            .map(|path| (path, repair_file(client, family, path, output_dir, options.max_lines)))
            .collect()
    });

    let mut stats = RepairStats {
        files: files.len(),
        ..Default::default()
    };
    for (path, result) in results {
        match result {
            Ok(RepairOutcome::Repaired { usage, .. }) => {
                stats.repaired += 1;
                stats.usage += usage;
            }
            Ok(RepairOutcome::Empty { usage }) => {
                stats.empty += 1;
                stats.usage += usage;
            }
            Ok(RepairOutcome::TooLong { .. }) => stats.too_long += 1,
            Err(err) => {
                warn!("Error processing {}: {:#}", path.display(), err);
                stats.failed_files.push(path.clone());
            }
        }
    }
    stats.elapsed = start.elapsed();
    Ok(stats)
}
