//! Splitting multi-scene files into one standalone unit per scene.
//!
//! A file with a single scene class is already a unit. Files with several
//! scenes are handed to a [`SceneExtractor`] once per scene, which returns a
//! rewritten file containing only that scene and what it depends on.

use anyhow::Result;
use regex::Regex;
use tracing::{debug, warn};

/// Extractor reply meaning "the source is already minimal for this scene".
pub const NO_CHANGE_SENTINEL: &str = "No change needed";

pub const DEFAULT_SCENE_BASES: &[&str] = &["Scene"];

/// Rewrites a multi-scene source so that only one scene remains.
pub trait SceneExtractor {
    /// Returns the rewritten source, or [`NO_CHANGE_SENTINEL`].
    fn extract(&self, source: &str, scene: &str) -> Result<String>;
}

impl<T: SceneExtractor + ?Sized> SceneExtractor for &T {
    fn extract(&self, source: &str, scene: &str) -> Result<String> {
        (**self).extract(source, scene)
    }
}

/// A self-contained scene ready to be written and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub scene: String,
    /// `<source stem>_<scene>`; the same inputs always give the same stem.
    pub stem: String,
    pub code: String,
}

impl Unit {
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.stem, extension)
    }
}

/// A scene that could not be extracted or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneFailure {
    pub scene: String,
    pub reason: String,
}

/// Result of decomposing one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    /// Scene class names found, in source order.
    pub scenes: Vec<String>,
    pub units: Vec<Unit>,
    pub failures: Vec<SceneFailure>,
}

impl Decomposition {
    /// True when the file defines no scene class at all.
    pub fn is_skipped(&self) -> bool {
        self.scenes.is_empty()
    }
}

pub fn unit_stem(source_stem: &str, scene: &str) -> String {
    format!("{}_{}", source_stem, scene)
}

/// Finds scene classes and produces one unit per scene.
#[derive(Debug, Clone)]
pub struct SceneDecomposer<E> {
    extractor: E,
    scene_regex: Regex,
}

impl<E: SceneExtractor> SceneDecomposer<E> {
    pub fn new(extractor: E) -> Self {
        let bases: Vec<String> = DEFAULT_SCENE_BASES.iter().map(|b| b.to_string()).collect();
        Self {
            extractor,
            scene_regex: scene_regex(&bases),
        }
    }

    /// Treat classes deriving directly from any of `bases` as scenes.
    /// An empty list falls back to the default `Scene` base.
    pub fn with_bases(extractor: E, bases: &[String]) -> Self {
        if bases.is_empty() {
            return Self::new(extractor);
        }
        Self {
            extractor,
            scene_regex: scene_regex(bases),
        }
    }

    /// Scene class names in source order, without duplicates.
    pub fn scene_names(&self, source: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in self.scene_regex.captures_iter(source) {
            let name = &caps[1];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    pub fn decompose(&self, source_stem: &str, source: &str) -> Decomposition {
        let scenes = self.scene_names(source);

        if scenes.is_empty() {
            debug!("{}: no scene classes found", source_stem);
            return Decomposition::default();
        }

        if let [scene] = scenes.as_slice() {
            let unit = Unit {
                scene: scene.clone(),
                stem: unit_stem(source_stem, scene),
                code: source.to_string(),
            };
            return Decomposition {
                units: vec![unit],
                scenes,
                failures: Vec::new(),
            };
        }

        let mut units = Vec::with_capacity(scenes.len());
        let mut failures = Vec::new();

        for scene in &scenes {
            match self.extractor.extract(source, scene) {
                Ok(code) => {
                    let code = if code.trim() == NO_CHANGE_SENTINEL {
                        source.to_string()
                    } else {
                        code
                    };
                    if code.trim().is_empty() {
                        warn!("{}: extractor returned nothing for scene {}", source_stem, scene);
                        failures.push(SceneFailure {
                            scene: scene.clone(),
                            reason: "empty extraction".to_string(),
                        });
                        continue;
                    }
                    units.push(Unit {
                        scene: scene.clone(),
                        stem: unit_stem(source_stem, scene),
                        code,
                    });
                }
                Err(err) => {
                    warn!("{}: extracting scene {} failed: {:#}", source_stem, scene, err);
                    failures.push(SceneFailure {
                        scene: scene.clone(),
                        reason: format!("{:#}", err),
                    });
                }
            }
        }

        Decomposition {
            scenes,
            units,
            failures,
        }
    }
}

fn scene_regex(bases: &[String]) -> Regex {
    let alternatives = bases
        .iter()
        .map(|b| regex::escape(b.trim()))
        .collect::<Vec<_>>()
        .join("|");
    // Escaped identifiers cannot produce an invalid pattern.
    Regex::new(&format!(
        r"class\s+([A-Za-z_]\w*)\s*\(\s*(?:{})\s*\)",
        alternatives
    ))
    .unwrap()
}
