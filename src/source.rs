//! Record sources: where raw corpus blobs come from.
//!
//! Two sources are supported. JSON Lines exports (one object per line with a
//! `content` field, the layout of public code-corpus dumps) read from a file,
//! a glob of shards or stdin; and plain directories, where every matching
//! file is one record. Both yield records lazily and skip entries they cannot
//! read instead of failing the whole run.

use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::glob;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::{CorpusKind, RawRecord};

/// Value of `--input` that reads JSON Lines from stdin.
pub const STDIN_MARKER: &str = "-";

/// Check if a pattern contains glob wildcards (* or ?).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub fn corpus_extensions(corpus: CorpusKind) -> &'static [&'static str] {
    match corpus {
        CorpusKind::Python => &["py"],
        CorpusKind::Tex => &["tex"],
        CorpusKind::Svg => &["svg"],
        CorpusKind::Json => &["json"],
    }
}

/// Open the source named by `input`.
///
/// - `-` reads JSON Lines from stdin
/// - a pattern with `*` or `?` expands to JSON Lines shards, in sorted order
/// - a directory is walked, keeping files of the corpus kind
/// - anything else is a single JSON Lines file
pub fn open_source(input: &str, corpus: Option<CorpusKind>) -> Result<Box<dyn Iterator<Item = RawRecord>>> {
    if input == STDIN_MARKER {
        let reader: Box<dyn BufRead> = Box::new(BufReader::new(io::stdin()));
        return Ok(Box::new(JsonlSource::from_reader("stdin", reader)));
    }

    if is_glob_pattern(input) {
        let mut shards: Vec<PathBuf> = glob(input)
            .with_context(|| format!("Invalid glob pattern: \"{}\"", input))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("cannot access shard: {}", e);
                    None
                }
            })
            .filter(|p| p.is_file())
            .collect();
        shards.sort();
        if shards.is_empty() {
            bail!("No input files match \"{}\"", input);
        }
        return Ok(Box::new(JsonlSource::from_files(shards)));
    }

    let path = Path::new(input);
    if path.is_dir() {
        return Ok(Box::new(DirectorySource::new(path, corpus)));
    }
    if !path.is_file() {
        bail!("Input does not exist: {}", path.display());
    }
    Ok(Box::new(JsonlSource::from_files(vec![path.to_path_buf()])))
}

#[derive(Debug, Deserialize)]
struct JsonlRow {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    hexsha: Option<String>,
    #[serde(default)]
    max_stars_repo_path: Option<String>,
}

/// Streams records from JSON Lines shards, one shard at a time.
pub struct JsonlSource {
    pending: std::vec::IntoIter<PathBuf>,
    current: Option<(String, Box<dyn BufRead>)>,
    line_no: usize,
}

impl JsonlSource {
    pub fn from_files(files: Vec<PathBuf>) -> Self {
        Self {
            pending: files.into_iter(),
            current: None,
            line_no: 0,
        }
    }

    pub fn from_reader(name: &str, reader: Box<dyn BufRead>) -> Self {
        Self {
            pending: Vec::new().into_iter(),
            current: Some((name.to_string(), reader)),
            line_no: 0,
        }
    }

    fn open_next(&mut self) -> bool {
        for path in self.pending.by_ref() {
            match File::open(&path) {
                Ok(file) => {
                    debug!("reading shard {}", path.display());
                    self.current = Some((path.display().to_string(), Box::new(BufReader::new(file))));
                    self.line_no = 0;
                    return true;
                }
                Err(e) => warn!("cannot open {}: {}", path.display(), e),
            }
        }
        false
    }

    fn parse_line(name: &str, line_no: usize, line: &str) -> Option<RawRecord> {
        let row: JsonlRow = match serde_json::from_str(line) {
            Ok(row) => row,
            Err(e) => {
                warn!("{}:{}: malformed record skipped: {}", name, line_no, e);
                return None;
            }
        };
        let content = row.content.filter(|c| !c.is_empty())?;
        let id = row
            .id
            .or(row.hexsha)
            .or(row.max_stars_repo_path)
            .unwrap_or_else(|| format!("{}:{}", name, line_no));
        Some(RawRecord { id, content })
    }
}

impl Iterator for JsonlSource {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        loop {
            if self.current.is_none() && !self.open_next() {
                return None;
            }
            let (name, reader) = self.current.as_mut()?;

            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => {
                    self.current = None;
                }
                Ok(_) => {
                    self.line_no += 1;
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Some(record) = Self::parse_line(name, self.line_no, &line) {
                        return Some(record);
                    }
                }
                Err(e) => {
                    warn!("{}: read failed, skipping rest of shard: {}", name, e);
                    self.current = None;
                }
            }
        }
    }
}

/// Every readable file under a directory, in file-name order.
pub struct DirectorySource {
    root: PathBuf,
    walker: walkdir::IntoIter,
    extensions: Option<&'static [&'static str]>,
}

impl DirectorySource {
    /// `corpus` restricts the walk to that corpus's file extensions.
    pub fn new(root: &Path, corpus: Option<CorpusKind>) -> Self {
        Self {
            root: root.to_path_buf(),
            walker: WalkDir::new(root).sort_by_file_name().into_iter(),
            extensions: corpus.map(corpus_extensions),
        }
    }

    fn wants(&self, path: &Path) -> bool {
        match self.extensions {
            None => true,
            Some(exts) => path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| exts.contains(&e)),
        }
    }
}

impl Iterator for DirectorySource {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !self.wants(path) {
                continue;
            }
            match fs::read_to_string(path) {
                Ok(content) => {
                    let id = path
                        .strip_prefix(&self.root)
                        .unwrap_or(path)
                        .to_string_lossy()
                        .into_owned();
                    return Some(RawRecord { id, content });
                }
                Err(e) => warn!("cannot read {}: {}", path.display(), e),
            }
        }
    }
}
