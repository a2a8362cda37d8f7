use std::path::PathBuf;

use anyhow::Result;

use super::super::args::RepairCommand;
use super::{
    CommandResult, CommandSummary, RepairSummary,
    helper::{project_config, resolve_family},
};
use crate::{
    llm::OpenAiClient,
    pipeline::{
        RepairOptions,
        repair::{default_output_dir, ensure_repairable},
        repair_dir,
    },
};

pub fn repair(cmd: RepairCommand) -> Result<CommandResult> {
    let config = project_config()?;
    let family = resolve_family(&cmd.family, &config)?;
    ensure_repairable(family)?;

    let root = PathBuf::from(&config.output_root);
    let input = cmd.input.unwrap_or_else(|| root.join(family.name()));
    let output = cmd.output.unwrap_or_else(|| default_output_dir(&root, family));

    let defaults = RepairOptions::from(&config.repair);
    let options = RepairOptions {
        max_lines: cmd.max_lines.unwrap_or(defaults.max_lines),
        workers: cmd.workers.unwrap_or(defaults.workers),
    };

    let client = OpenAiClient::from_env(&config.llm)?;
    let stats = repair_dir(&client, family, &input, &output, options)?;

    Ok(CommandResult::new(CommandSummary::Repair(RepairSummary {
        family,
        output,
        stats,
    })))
}
