//! Stats command: HSK and tracked words per frequency bucket.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use hsk_coverage_core::stats::{self, FrequencyStats};

use super::{InputArgs, RunContext};

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Word list and tracked-set inputs.
    #[command(flatten)]
    pub input: InputArgs,

    /// HSK level filter; 7 switches to the extended tier.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub level: Option<u8>,

    /// Rank cutoff for the top-N coverage figure.
    #[arg(long)]
    pub top_n: Option<u32>,
}

/// Compute and print frequency-bucket statistics.
#[instrument(name = "cmd_stats", skip_all, fields(level = ?args.level))]
pub fn cmd_stats(args: StatsArgs, global_json: bool, ctx: RunContext<'_>) -> anyhow::Result<()> {
    debug!(words = ?args.input.words, tracked = ?args.input.tracked, "executing stats command");

    let (words, tracked) = ctx.load_inputs(&args.input)?;

    let mut options = ctx.config.stats_options();
    if let Some(top_n) = args.top_n {
        options.top_n = top_n;
    }

    let report = stats::compute_frequency_stats_with(&words, &tracked, args.level, &options);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &FrequencyStats) {
    println!(
        "{:>12}  {:>6}  {:>7}  {:>5}",
        "Rank".bold(),
        "HSK".bold(),
        "Tracked".bold(),
        "%".bold()
    );
    for bucket in &report.buckets {
        let share = percent(bucket.tracked_count, bucket.hsk_count);
        println!(
            "{:>12}  {:>6}  {:>7}  {:>5}",
            bucket.label,
            bucket.hsk_count,
            bucket.tracked_count,
            share.map_or_else(|| "-".to_string(), |p| format!("{p}%")),
        );
    }

    println!();
    println!(
        "{}: {} of {} tracked",
        "Total".dimmed(),
        report.total_tracked,
        report.total_words
    );
    if let (Some(level_words), Some(level_tracked)) = (report.level_words, report.level_tracked) {
        println!(
            "{}: {} of {} tracked",
            "Extended tier".dimmed(),
            level_tracked,
            level_words
        );
    }

    let summary = format!(
        "Top {}: {} of {} tracked ({}%)",
        report.top_n, report.top_n_tracked, report.top_n_words, report.coverage_percent
    );
    if report.coverage_percent >= 50 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }
}

fn percent(part: usize, whole: usize) -> Option<usize> {
    (whole > 0).then(|| (part * 100 + whole / 2) / whole)
}
