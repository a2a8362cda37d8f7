//! On-disk sample store: `<root>/<family>/<identity>.<ext>`.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::core::LibraryFamily;

/// How a stored sample is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdentityStrategy {
    /// `example_<n>`, counting from 0 per family. Re-runs overwrite.
    #[default]
    Sequential,
    /// SHA-256 of the content. Re-runs skip content already stored.
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSample {
    pub family: LibraryFamily,
    pub identity: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(StoredSample),
    /// Byte-identical content was already present under the same hash.
    AlreadyStored(StoredSample),
}

impl WriteOutcome {
    pub fn sample(&self) -> &StoredSample {
        match self {
            WriteOutcome::Written(s) | WriteOutcome::AlreadyStored(s) => s,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written(_))
    }
}

/// Hex SHA-256 of `content`.
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("{:x}", digest)
}

/// Write `content` to `path` via a sibling temp file and a rename, creating
/// parent directories as needed. Readers never see a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("Not a file path: {}", path.display()))?;
    let tmp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("Failed to move file into place: {}", path.display()));
    }
    Ok(())
}

/// Persists accepted samples under a per-family directory.
///
/// Holds the per-family sequence counters; a counter only advances after a
/// successful write.
#[derive(Debug)]
pub struct SampleWriter {
    root: PathBuf,
    strategy: IdentityStrategy,
    counters: HashMap<LibraryFamily, usize>,
}

impl SampleWriter {
    pub fn new(root: impl Into<PathBuf>, strategy: IdentityStrategy) -> Self {
        Self {
            root: root.into(),
            strategy,
            counters: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn strategy(&self) -> IdentityStrategy {
        self.strategy
    }

    pub fn family_dir(&self, family: LibraryFamily) -> PathBuf {
        self.root.join(family.name())
    }

    /// Number of samples written for `family` by this writer.
    pub fn written(&self, family: LibraryFamily) -> usize {
        self.counters.get(&family).copied().unwrap_or(0)
    }

    pub fn write(&mut self, family: LibraryFamily, content: &str) -> Result<WriteOutcome> {
        let identity = match self.strategy {
            IdentityStrategy::Sequential => format!("example_{}", self.written(family)),
            IdentityStrategy::Hash => content_hash(content),
        };
        let path = self
            .family_dir(family)
            .join(format!("{}.{}", identity, family.extension()));
        let sample = StoredSample {
            family,
            identity,
            path,
        };

        if self.strategy == IdentityStrategy::Hash && sample.path.exists() {
            debug!("already stored: {}", sample.path.display());
            return Ok(WriteOutcome::AlreadyStored(sample));
        }

        write_atomic(&sample.path, content)?;
        *self.counters.entry(family).or_insert(0) += 1;
        info!("saved {} sample {} to {}", family, sample.identity, sample.path.display());
        Ok(WriteOutcome::Written(sample))
    }
}
