//! Passes that connect the pure engine to the file system and the LLM.
//!
//! - `sample`: stream records, classify, language-filter, persist
//! - `decompose`: split stored multi-scene samples into units (parallel)
//! - `repair`: LLM rewrite of stored samples (parallel, bounded pool)

pub mod decompose;
pub mod repair;
pub mod sample;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::warn;
use walkdir::WalkDir;

pub use decompose::{DecomposeStats, decompose_dir};
pub use repair::{RepairOptions, RepairStats, repair_dir};
pub use sample::{SampleOutcome, SampleStats, Sampler};

/// Files under `dir` with the given extension, sorted by path.
fn collect_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Input directory does not exist: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
