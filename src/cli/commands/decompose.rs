use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use super::super::args::DecomposeCommand;
use super::{CommandResult, CommandSummary, DecomposeSummary, helper::project_config};
use crate::{
    core::{LibraryFamily, SceneDecomposer},
    llm::{DisabledClient, LlmClient, LlmSceneExtractor, OpenAiClient},
    pipeline::decompose_dir,
};

pub fn decompose(cmd: DecomposeCommand) -> Result<CommandResult> {
    let config = project_config()?;
    let root = PathBuf::from(&config.output_root);
    let input = cmd
        .input
        .unwrap_or_else(|| root.join(LibraryFamily::Manim.name()));
    let output = cmd
        .output
        .unwrap_or_else(|| root.join(format!("{}_scenes", LibraryFamily::Manim.name())));

    // Single-scene files never reach the model, so a missing key is not fatal.
    let client: Box<dyn LlmClient> = match OpenAiClient::from_env(&config.llm) {
        Ok(client) => Box::new(client),
        Err(err) => {
            warn!("{}; multi-scene files will not be split", err);
            Box::new(DisabledClient::new(err.to_string()))
        }
    };
    let extractor = LlmSceneExtractor::new(client);
    let decomposer = SceneDecomposer::with_bases(&extractor, &config.scene_bases);
    let stats = decompose_dir(&decomposer, &input, &output)?;

    let usage = extractor.usage();
    info!(
        "token usage: {} input, {} output, {} total",
        usage.input_tokens, usage.output_tokens, usage.total_tokens
    );

    Ok(CommandResult::new(CommandSummary::Decompose(DecomposeSummary {
        output,
        stats,
    })))
}
