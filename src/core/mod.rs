//! Classification and extraction engine.
//!
//! Everything in here is pure: no file system, no network. The pipeline
//! layer feeds it records and persists what it accepts.
//!
//! ## Module Structure
//!
//! - `segment`: prose extraction from comments, string literals and text nodes
//! - `language`: sliding-window natural-language detection
//! - `family`: library families and their trigger substrings
//! - `filters`: per-family structural filters
//! - `classify`: ordered first-match-wins classifier
//! - `scenes`: multi-scene decomposition
//! - `record`: raw and classified records

pub mod classify;
pub mod family;
pub mod filters;
pub mod language;
pub mod record;
pub mod scenes;
pub mod segment;

pub use classify::{Classifier, FamilyRule, Verdict};
pub use family::{CorpusKind, LibraryFamily, UnknownFamily};
pub use language::{
    DetectError, DetectorBackend, LanguageFilter, LanguageTag, LanguageVerdict, WhatlangBackend,
    WindowedDetector,
};
pub use record::{ClassifiedSample, RawRecord};
pub use scenes::{
    Decomposition, NO_CHANGE_SENTINEL, SceneDecomposer, SceneExtractor, SceneFailure, Unit,
};
