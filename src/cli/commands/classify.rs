use std::fs;

use anyhow::{Context, Result};

use super::super::args::ClassifyCommand;
use super::{
    ClassifySummary, CommandResult, CommandSummary,
    helper::{language_filter, project_config},
};
use crate::core::Classifier;

pub fn classify(cmd: ClassifyCommand) -> Result<CommandResult> {
    let config = project_config()?;
    let code = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read file: {}", cmd.file.display()))?;

    let classifier = Classifier::new(&config.enabled_families()?);
    let verdict = classifier.evaluate(&code);

    let language = verdict
        .accepted()
        .map(|family| language_filter(&config).check(&code, family.corpus()));

    Ok(CommandResult::new(CommandSummary::Classify(ClassifySummary {
        path: cmd.file,
        verdict,
        language,
    })))
}
