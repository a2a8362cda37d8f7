//! Natural-language detection over the prose embedded in source code.
//!
//! Detection runs over a word sequence (see [`crate::core::segment`]) using a
//! sliding window with majority vote, so one long foreign-language string
//! does not outweigh many short English comments.
//!
//! ## Module Structure
//!
//! - [`trigram`] - Default detector backend built on the `whatlang` crate

pub mod trigram;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{family::CorpusKind, segment::prose_words};

pub use trigram::WhatlangBackend;

pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_WINDOW_STRIDE: usize = 5;

/// Upper-case natural-language tag such as `EN` or `JA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    const UNKNOWN: &'static str = "UNKNOWN";

    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure of a single detection call.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("no language could be identified in {chars} characters of text")]
    Undetermined { chars: usize },

    #[error("detector backend failed: {0}")]
    Backend(String),
}

/// A single-shot language detector.
pub trait DetectorBackend {
    fn detect(&self, text: &str) -> Result<LanguageTag, DetectError>;
}

impl<T: DetectorBackend + ?Sized> DetectorBackend for &T {
    fn detect(&self, text: &str) -> Result<LanguageTag, DetectError> {
        (**self).detect(text)
    }
}

impl<T: DetectorBackend + ?Sized> DetectorBackend for Box<T> {
    fn detect(&self, text: &str) -> Result<LanguageTag, DetectError> {
        (**self).detect(text)
    }
}

/// Majority-vote detector over overlapping word windows.
#[derive(Debug, Clone)]
pub struct WindowedDetector<B> {
    backend: B,
    window: usize,
    stride: usize,
}

impl<B: DetectorBackend> WindowedDetector<B> {
    pub fn new(backend: B) -> Self {
        Self::with_window(backend, DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_STRIDE)
    }

    /// Both `window` and `stride` are clamped to at least 1.
    pub fn with_window(backend: B, window: usize, stride: usize) -> Self {
        Self {
            backend,
            window: window.max(1),
            stride: stride.max(1),
        }
    }

    /// Detect the dominant language of a word sequence.
    ///
    /// Sequences shorter than the window are detected with a single call.
    /// Longer sequences are scanned window by window; a failing window casts
    /// no vote. The tag with the most votes wins, ties going to the tag seen
    /// first. Returns `UNKNOWN` when nothing could be detected.
    pub fn detect(&self, words: &[String]) -> LanguageTag {
        if words.len() < self.window {
            return match self.backend.detect(&words.join(" ")) {
                Ok(tag) => tag,
                Err(err) => {
                    trace!("short text undetected: {}", err);
                    LanguageTag::unknown()
                }
            };
        }

        // Insertion-ordered tally; the first tag to reach the top count wins ties.
        let mut votes: Vec<(LanguageTag, usize)> = Vec::new();
        let last_start = words.len() - self.window;

        for start in (0..=last_start).step_by(self.stride) {
            let snippet = words[start..start + self.window].join(" ");
            match self.backend.detect(&snippet) {
                Ok(tag) => match votes.iter_mut().find(|(seen, _)| *seen == tag) {
                    Some((_, count)) => *count += 1,
                    None => votes.push((tag, 1)),
                },
                Err(err) => trace!("window at word {} skipped: {}", start, err),
            }
        }

        let mut best: Option<&(LanguageTag, usize)> = None;
        for entry in &votes {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }

        best.map(|(tag, _)| tag.clone())
            .unwrap_or_else(LanguageTag::unknown)
    }
}

/// Accepts code whose embedded prose is in one of the configured languages.
#[derive(Debug, Clone)]
pub struct LanguageFilter<B> {
    detector: WindowedDetector<B>,
    accepted: Vec<LanguageTag>,
}

impl<B: DetectorBackend> LanguageFilter<B> {
    pub fn new(detector: WindowedDetector<B>, accepted: Vec<LanguageTag>) -> Self {
        Self { detector, accepted }
    }

    pub fn accepted(&self) -> &[LanguageTag] {
        &self.accepted
    }

    /// Run the language gate on `code` read as a `corpus` file.
    pub fn check(&self, code: &str, corpus: CorpusKind) -> LanguageVerdict {
        let Some(words) = prose_words(code, corpus) else {
            return LanguageVerdict::NotApplicable;
        };
        let language = self.detector.detect(&words);
        let accepted = self.accepted.contains(&language);
        debug!("detected language: {} (accepted: {})", language, accepted);
        LanguageVerdict::Detected { language, accepted }
    }

    /// True if the prose of a Python file is in an accepted language.
    pub fn is_accepted(&self, code: &str) -> bool {
        self.check(code, CorpusKind::Python).is_accepted()
    }
}

/// Outcome of the language gate for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageVerdict {
    /// The corpus has no prose to judge; the gate lets the file through.
    NotApplicable,
    Detected { language: LanguageTag, accepted: bool },
}

impl LanguageVerdict {
    pub fn is_accepted(&self) -> bool {
        match self {
            LanguageVerdict::NotApplicable => true,
            LanguageVerdict::Detected { accepted, .. } => *accepted,
        }
    }

    pub fn language(&self) -> Option<&LanguageTag> {
        match self {
            LanguageVerdict::NotApplicable => None,
            LanguageVerdict::Detected { language, .. } => Some(language),
        }
    }
}
