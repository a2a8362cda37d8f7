use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use super::super::args::SampleCommand;
use super::{
    CommandResult, CommandSummary, SampleSummary,
    helper::{language_filter, project_config, resolve_family},
};
use crate::{core::Classifier, pipeline::Sampler, source::open_source, store::SampleWriter};

pub fn sample(cmd: SampleCommand) -> Result<CommandResult> {
    let config = project_config()?;
    let family = resolve_family(&cmd.family, &config)?;

    let corpus = family.corpus();
    let classifier = Classifier::for_corpus(corpus, &config.enabled_families()?);
    info!(
        "sampling {} corpus for: {}",
        corpus.as_str(),
        classifier.families().map(|f| f.name()).collect::<Vec<_>>().join(", ")
    );

    let root = cmd.output.unwrap_or_else(|| PathBuf::from(&config.output_root));
    let identity = cmd.identity.unwrap_or(config.identity);
    let writer = SampleWriter::new(&root, identity);

    let records = open_source(&cmd.input, Some(corpus))?;
    let mut sampler = Sampler::new(classifier, language_filter(&config), writer);
    let stats = sampler.run(records, cmd.max)?;

    Ok(CommandResult::new(CommandSummary::Sample(SampleSummary {
        family,
        root,
        max: cmd.max,
        stats,
    })))
}
