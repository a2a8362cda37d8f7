use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        LibraryFamily,
        language::{DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_STRIDE},
        scenes::DEFAULT_SCENE_BASES,
    },
    store::IdentityStrategy,
};

pub const CONFIG_FILE_NAME: &str = ".scenesiftrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Two-letter language codes a sample's comments may be written in.
    #[serde(default = "default_accepted_languages")]
    pub accepted_languages: Vec<String>,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_window_stride")]
    pub window_stride: usize,
    /// Families tried by the classifier, in priority order.
    #[serde(default = "default_families")]
    pub families: Vec<String>,
    #[serde(default)]
    pub identity: IdentityStrategy,
    #[serde(default = "default_output_root")]
    pub output_root: String,
    #[serde(default = "default_scene_bases")]
    pub scene_bases: Vec<String>,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub repair: RepairConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairConfig {
    /// Files with more lines than this are not sent to the model.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_accepted_languages() -> Vec<String> {
    ["EN", "JA"].map(String::from).to_vec()
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_window_stride() -> usize {
    DEFAULT_WINDOW_STRIDE
}

fn default_families() -> Vec<String> {
    LibraryFamily::ALL.iter().map(|f| f.name().to_string()).collect()
}

fn default_output_root() -> String {
    "sampled".to_string()
}

fn default_scene_bases() -> Vec<String> {
    DEFAULT_SCENE_BASES.iter().map(|b| b.to_string()).collect()
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_max_lines() -> usize {
    1000
}

fn default_workers() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accepted_languages: default_accepted_languages(),
            window_size: default_window_size(),
            window_stride: default_window_stride(),
            families: default_families(),
            identity: IdentityStrategy::default(),
            output_root: default_output_root(),
            scene_bases: default_scene_bases(),
            llm: LlmConfig::default(),
            repair: RepairConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            workers: default_workers(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.accepted_languages.iter().all(|l| l.trim().is_empty()) {
            bail!("'acceptedLanguages' must name at least one language");
        }
        if self.window_size == 0 {
            bail!("'windowSize' must be at least 1");
        }
        if self.window_stride == 0 {
            bail!("'windowStride' must be at least 1");
        }
        if self.families.is_empty() {
            bail!("'families' must name at least one family");
        }
        self.enabled_families().context("Invalid entry in 'families'")?;
        if self.scene_bases.iter().any(|b| b.trim().is_empty()) {
            bail!("'sceneBases' must not contain empty names");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            bail!("'llm.temperature' must be between 0 and 2");
        }
        if self.repair.workers == 0 {
            bail!("'repair.workers' must be at least 1");
        }
        Ok(())
    }

    /// Families in priority order, duplicates removed.
    pub fn enabled_families(&self) -> Result<Vec<LibraryFamily>> {
        let mut families = Vec::with_capacity(self.families.len());
        for name in &self.families {
            let family: LibraryFamily = name.parse()?;
            if !families.contains(&family) {
                families.push(family);
            }
        }
        Ok(families)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
