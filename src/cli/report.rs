//! Report formatting and printing utilities.
//!
//! Summaries are printed cargo-style to stdout, warnings to stderr. Kept
//! apart from the pipeline so scenesift can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use super::commands::{
    ClassifySummary, CommandResult, CommandSummary, DecomposeSummary, InitSummary, RepairSummary,
    SampleSummary,
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::{LanguageVerdict, Verdict},
    llm::TokenUsage,
    utils::{format_duration, pluralize},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of failed paths listed without `-v`.
const MAX_PATHS_DISPLAY: usize = 3;

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result to custom writers.
///
/// Useful for testing or redirecting output.
pub fn print_to<O: Write, E: Write>(result: &CommandResult, verbose: bool, out: &mut O, err: &mut E) {
    match &result.summary {
        CommandSummary::Sample(summary) => print_sample(summary, verbose, out, err),
        CommandSummary::Classify(summary) => print_classify(summary, out),
        CommandSummary::Decompose(summary) => print_decompose(summary, verbose, out, err),
        CommandSummary::Repair(summary) => print_repair(summary, verbose, out, err),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn print_sample<O: Write, E: Write>(summary: &SampleSummary, verbose: bool, out: &mut O, err: &mut E) {
    let stats = &summary.stats;

    if stats.accepted() == 0 {
        let _ = writeln!(
            out,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "No {} samples accepted from {}",
                summary.family.corpus().as_str(),
                pluralize(stats.scanned, "record", "records")
            )
            .red()
        );
    } else {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Saved {} in {}",
                pluralize(stats.written, "sample", "samples"),
                format_duration(stats.elapsed)
            )
            .green()
        );
        let width = stats
            .per_family
            .iter()
            .map(|(family, _)| family.name().len())
            .max()
            .unwrap_or(0);
        for (family, count) in &stats.per_family {
            let _ = writeln!(
                out,
                "  {}  {:>4}  {} {}",
                format!("{:<width$}", family.name(), width = width).bold(),
                count,
                "-->".blue(),
                summary.root.join(family.name()).display()
            );
        }
    }

    if stats.already_stored > 0 {
        let _ = writeln!(
            err,
            "{} {} already stored, not rewritten",
            "note:".bold(),
            pluralize(stats.already_stored, "sample was", "samples were")
        );
    }

    if let Some(max) = summary.max
        && stats.accepted() < max
    {
        let _ = writeln!(
            err,
            "{} input ended after {} of {} requested samples",
            "warning:".bold().yellow(),
            stats.accepted(),
            max
        );
    }

    if verbose {
        let _ = writeln!(
            out,
            "Scanned {}: {} without trigger, {} rejected by filter, {} in another language",
            pluralize(stats.scanned, "record", "records"),
            stats.no_trigger,
            stats.rejected,
            stats.wrong_language
        );
    }
}

fn print_classify<O: Write>(summary: &ClassifySummary, out: &mut O) {
    let path = summary.path.display();
    let line = match (summary.verdict, &summary.language) {
        (
            Verdict::Accepted(family),
            Some(LanguageVerdict::Detected {
                language,
                accepted: true,
            }),
        ) => format!(
            "{} {}: {} (language {})",
            SUCCESS_MARK.green(),
            path,
            family.name().green().bold(),
            language
        ),
        (Verdict::Accepted(family), Some(LanguageVerdict::NotApplicable)) => format!(
            "{} {}: {}",
            SUCCESS_MARK.green(),
            path,
            family.name().green().bold()
        ),
        (
            Verdict::Accepted(family),
            Some(LanguageVerdict::Detected {
                language,
                accepted: false,
            }),
        ) => format!(
            "{} {}: {}, language {} is not accepted",
            FAILURE_MARK.red(),
            path,
            family.name().bold(),
            language.to_string().red()
        ),
        (Verdict::Accepted(family), None) | (Verdict::Rejected(family), _) => format!(
            "{} {}: {} trigger found, {}",
            FAILURE_MARK.red(),
            path,
            family.name().bold(),
            "rejected by structural filter".red()
        ),
        (Verdict::NoTrigger, _) => format!(
            "{} {}: {}",
            FAILURE_MARK.red(),
            path,
            "no library trigger found".red()
        ),
    };
    let _ = writeln!(out, "{}", line);
}

fn print_decompose<O: Write, E: Write>(summary: &DecomposeSummary, verbose: bool, out: &mut O, err: &mut E) {
    let stats = &summary.stats;
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} from {} in {}",
            pluralize(stats.units_written, "scene unit", "scene units"),
            pluralize(stats.files, "file", "files"),
            format_duration(stats.elapsed)
        )
        .green()
    );
    let _ = writeln!(out, "  {} {}", "-->".blue(), summary.output.display());

    if stats.skipped > 0 {
        let _ = writeln!(
            err,
            "{} {} without a scene class skipped",
            "note:".bold(),
            pluralize(stats.skipped, "file", "files")
        );
    }
    if stats.failed_scenes > 0 {
        let _ = writeln!(
            err,
            "{} {} could not be extracted{}",
            "warning:".bold().yellow(),
            pluralize(stats.failed_scenes, "scene", "scenes"),
            if verbose { "" } else { " (use -v for details)" }
        );
    }
    print_failed_files(&stats.failed_files, verbose, err);
}

fn print_repair<O: Write, E: Write>(summary: &RepairSummary, verbose: bool, out: &mut O, err: &mut E) {
    let stats = &summary.stats;
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Repaired {} of {} {} file(s) in {}",
            stats.repaired,
            stats.files,
            summary.family,
            format_duration(stats.elapsed)
        )
        .green()
    );
    let _ = writeln!(out, "  {} {}", "-->".blue(), summary.output.display());
    print_usage(&stats.usage, out);

    if stats.too_long > 0 {
        let _ = writeln!(
            err,
            "{} {} over the line limit skipped",
            "note:".bold(),
            pluralize(stats.too_long, "file", "files")
        );
    }
    if stats.empty > 0 {
        let _ = writeln!(
            err,
            "{} model returned no code for {}",
            "warning:".bold().yellow(),
            pluralize(stats.empty, "file", "files")
        );
    }
    print_failed_files(&stats.failed_files, verbose, err);
}

fn print_usage<O: Write>(usage: &TokenUsage, out: &mut O) {
    let _ = writeln!(
        out,
        "  {} {} input, {} output, {} total",
        "tokens:".dimmed(),
        usage.input_tokens,
        usage.output_tokens,
        usage.total_tokens
    );
}

fn print_failed_files<E: Write, P: AsRef<Path>>(paths: &[P], verbose: bool, err: &mut E) {
    if paths.is_empty() {
        return;
    }
    let shown = if verbose {
        paths.len()
    } else {
        paths.len().min(MAX_PATHS_DISPLAY)
    };
    for path in paths.iter().take(shown) {
        let _ = writeln!(
            err,
            "{}: could not process {}",
            "error".bold().red(),
            path.as_ref().display()
        );
    }
    if shown < paths.len() {
        let _ = writeln!(err, "  ... and {} more (use {} for all)", paths.len() - shown, "-v".cyan());
    }
}

fn print_init<O: Write, E: Write>(summary: &InitSummary, out: &mut O, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(err, "Error: {} already exists", CONFIG_FILE_NAME);
    }
}
