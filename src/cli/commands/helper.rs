use std::env;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::{
    config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config},
    core::{LanguageFilter, LanguageTag, LibraryFamily, WhatlangBackend, WindowedDetector},
};

/// Load the configuration for the current working directory.
pub fn project_config() -> Result<Config> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let ConfigLoadResult { config, from_file } = load_config(&cwd)?;
    if from_file {
        debug!("loaded {}", CONFIG_FILE_NAME);
    } else {
        debug!("no {} found, using defaults", CONFIG_FILE_NAME);
    }
    Ok(config)
}

/// Resolve a family name given on the command line.
///
/// Fails for names outside the trigger table and for families the
/// configuration does not enable.
pub fn resolve_family(name: &str, config: &Config) -> Result<LibraryFamily> {
    let family: LibraryFamily = name.parse()?;
    if !config.enabled_families()?.contains(&family) {
        bail!(
            "Family '{}' is not enabled in 'families' of {}",
            family,
            CONFIG_FILE_NAME
        );
    }
    Ok(family)
}

pub fn language_filter(config: &Config) -> LanguageFilter<WhatlangBackend> {
    let detector =
        WindowedDetector::with_window(WhatlangBackend::new(), config.window_size, config.window_stride);
    let accepted = config
        .accepted_languages
        .iter()
        .map(|code| LanguageTag::new(code))
        .collect();
    LanguageFilter::new(detector, accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_family() {
        let config = Config::default();
        assert_eq!(resolve_family("Manim", &config).unwrap(), LibraryFamily::Manim);

        let err = resolve_family("blender", &config).unwrap_err();
        assert!(err.to_string().contains("unknown library family 'blender'"));
    }

    #[test]
    fn test_resolve_disabled_family() {
        let config = Config {
            families: vec!["manim".to_string()],
            ..Default::default()
        };
        let err = resolve_family("tikz", &config).unwrap_err();
        assert!(err.to_string().contains("not enabled"));
    }

    #[test]
    fn test_language_filter_uses_config() {
        let config = Config {
            accepted_languages: vec!["en".to_string()],
            ..Default::default()
        };
        assert_eq!(language_filter(&config).accepted(), &[LanguageTag::new("EN")]);
    }
}
