use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, classify::classify, decompose::decompose, init::init, repair::repair,
        sample::sample,
    },
};

/// Dispatch to the command handler named by the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with the command summary and error count
/// - `Err` if the command cannot run at all (bad config, unknown family, missing input)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Sample(cmd)) => sample(cmd),
        Some(Command::Classify(cmd)) => classify(cmd),
        Some(Command::Decompose(cmd)) => decompose(cmd),
        Some(Command::Repair(cmd)) => repair(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
