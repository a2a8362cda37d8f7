//! Scene decomposition over a directory of stored samples.
//!
//! Files are processed in parallel. Each file only ever writes its own
//! `<stem>_<Scene>.py` units, so no coordination is needed between workers.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use super::{collect_files, file_stem};
use crate::{
    core::{Decomposition, SceneDecomposer, SceneExtractor, SceneFailure},
    store::write_atomic,
};

const UNIT_EXTENSION: &str = "py";

/// Counters for one decomposition run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecomposeStats {
    pub files: usize,
    /// Files without any scene class.
    pub skipped: usize,
    pub units_written: usize,
    /// Scenes that could not be extracted or whose unit could not be written.
    pub failed_scenes: usize,
    /// Files that could not be read.
    pub failed_files: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Decompose one file and write its units into `output_dir`.
///
/// A unit that cannot be written moves from `units` to `failures`; the
/// remaining units are still written.
pub fn decompose_file<E: SceneExtractor>(
    decomposer: &SceneDecomposer<E>,
    path: &Path,
    output_dir: &Path,
) -> Result<Decomposition> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let mut decomposition = decomposer.decompose(&file_stem(path), &source);

    if decomposition.is_skipped() {
        info!("{}: no scenes, skipped", path.display());
        return Ok(decomposition);
    }

    for unit in std::mem::take(&mut decomposition.units) {
        let target = output_dir.join(unit.file_name(UNIT_EXTENSION));
        match write_atomic(&target, &unit.code) {
            Ok(()) => {
                info!("saved scene {} to {}", unit.scene, target.display());
                decomposition.units.push(unit);
            }
            Err(err) => {
                warn!("{}: scene {} not saved: {:#}", path.display(), unit.scene, err);
                decomposition.failures.push(SceneFailure {
                    scene: unit.scene,
                    reason: format!("{:#}", err),
                });
            }
        }
    }
    Ok(decomposition)
}

/// Decompose every `.py` file under `input_dir`.
///
/// A file that fails is logged and counted; the others carry on.
pub fn decompose_dir<E>(decomposer: &SceneDecomposer<E>, input_dir: &Path, output_dir: &Path) -> Result<DecomposeStats>
where
    E: SceneExtractor + Sync,
{
    let start = Instant::now();
    let files = collect_files(input_dir, UNIT_EXTENSION)?;

    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, decompose_file(decomposer, path, output_dir)))
        .collect();

    let mut stats = DecomposeStats {
        files: files.len(),
        ..Default::default()
    };
    for (path, result) in results {
        match result {
            Ok(decomposition) => {
                if decomposition.is_skipped() {
                    stats.skipped += 1;
                }
                stats.units_written += decomposition.units.len();
                stats.failed_scenes += decomposition.failures.len();
            }
            Err(err) => {
                warn!("{}: {:#}", path.display(), err);
                stats.failed_files.push(path.clone());
            }
        }
    }
    stats.elapsed = start.elapsed();
    Ok(stats)
}
