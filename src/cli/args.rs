//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sample`: stream a corpus and store animation samples of one corpus kind
//! - `classify`: show the family and language verdict for one file
//! - `decompose`: split stored multi-scene files into one file per scene
//! - `repair`: ask the LLM for compilable rewrites of stored samples
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::store::IdentityStrategy;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Sample(cmd)) => cmd.common.verbose,
            Some(Command::Classify(cmd)) => cmd.common.verbose,
            Some(Command::Decompose(cmd)) => cmd.common.verbose,
            Some(Command::Repair(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SampleCommand {
    /// Library family to sample (manim, matplotlib, vpython, tikz, pyvista, mayavi, vtk, visit, svg, lottie)
    pub family: String,

    /// JSON Lines file, glob of shards, directory, or `-` for stdin
    #[arg(short, long)]
    pub input: String,

    /// Stop after this many accepted samples
    #[arg(long)]
    pub max: Option<usize>,

    /// How stored samples are named (overrides config file)
    #[arg(long, value_enum)]
    pub identity: Option<IdentityStrategy>,

    /// Sample store root (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ClassifyCommand {
    /// Source file to classify
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct DecomposeCommand {
    /// Directory of stored samples [default: <outputRoot>/manim]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for scene units [default: <outputRoot>/manim_scenes]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RepairCommand {
    /// Family whose stored samples are rewritten (manim, matplotlib, vpython)
    pub family: String,

    /// Directory of stored samples [default: <outputRoot>/<family>]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for rewritten files [default: <outputRoot>/<family>_fixed]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip files longer than this many lines (overrides config file)
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Number of parallel requests (overrides config file)
    #[arg(long)]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stream a corpus and store animation samples
    Sample(SampleCommand),
    /// Print the family and language verdict for one file
    Classify(ClassifyCommand),
    /// Split multi-scene samples into one file per scene
    Decompose(DecomposeCommand),
    /// Rewrite stored samples into compilable code with an LLM
    Repair(RepairCommand),
    /// Initialize a new .scenesiftrc.json configuration file
    Init,
}
