//! Coverage command: estimated running-text coverage by frequency rank.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use hsk_coverage_core::coverage::{self, CoverageCurveData, MAX_RANK_BOUND};

use super::{InputArgs, RunContext};

/// Arguments for the `coverage` subcommand.
#[derive(Args, Debug)]
pub struct CoverageArgs {
    /// Word list and tracked-set inputs.
    #[command(flatten)]
    pub input: InputArgs,

    /// Highest rank considered by the curve.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_RANK_BOUND)))]
    pub rank_bound: Option<u32>,

    /// Print only the final percentages, not every sampled point.
    #[arg(long)]
    pub summary: bool,
}

/// Compute and print the coverage curve.
#[instrument(name = "cmd_coverage", skip_all, fields(rank_bound = ?args.rank_bound))]
pub fn cmd_coverage(
    args: CoverageArgs,
    global_json: bool,
    ctx: RunContext<'_>,
) -> anyhow::Result<()> {
    debug!(words = ?args.input.words, tracked = ?args.input.tracked, "executing coverage command");

    let (words, tracked) = ctx.load_inputs(&args.input)?;

    let mut options = ctx.config.coverage_options();
    if let Some(bound) = args.rank_bound {
        options.rank_bound = bound;
    }

    let curve = coverage::compute_coverage_curve_with(&words, &tracked, &options);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&curve)?);
        return Ok(());
    }

    if !args.summary {
        print_points(&curve);
        println!();
    }
    print_summary(&curve);

    Ok(())
}

fn print_points(curve: &CoverageCurveData) {
    println!(
        "{:>6}  {:>7}  {:>7}  {:>7}  {:>7}",
        "Rank".bold(),
        "Zipf".bold(),
        "HSK1-6".bold(),
        "HSK all".bold(),
        "Tracked".bold()
    );
    for point in &curve.points {
        println!(
            "{:>6}  {:>6.1}%  {:>6.1}%  {:>6.1}%  {:>6.1}%",
            point.rank,
            point.zipf_percent,
            point.hsk16_percent,
            point.hsk_all_percent,
            point.tracked_percent
        );
    }
}

fn print_summary(curve: &CoverageCurveData) {
    println!(
        "{}: {:.1}%",
        "Tracked coverage".dimmed(),
        curve.tracked_final_percent.green()
    );
    println!(
        "{}: {:.1}%",
        "HSK 1-6 coverage".dimmed(),
        curve.hsk16_final_percent
    );
    println!(
        "{}: {:.1}%",
        "All HSK coverage".dimmed(),
        curve.hsk_all_final_percent
    );
}
