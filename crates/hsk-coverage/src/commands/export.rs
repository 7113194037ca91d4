//! Export command: plan a flashcard deck from the tracked HSK 1-6 words.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use hsk_coverage_core::export::{self, ExportMode};

use super::{InputArgs, RunContext};

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Word list and tracked-set inputs.
    #[command(flatten)]
    pub input: InputArgs,

    /// Force a note model instead of choosing by deck size.
    #[arg(short, long, value_enum)]
    pub mode: Option<ExportMode>,

    /// List every planned note.
    #[arg(long)]
    pub notes: bool,
}

/// Plan an export and print it.
#[instrument(name = "cmd_export", skip_all, fields(mode = ?args.mode))]
pub fn cmd_export(args: ExportArgs, global_json: bool, ctx: RunContext<'_>) -> anyhow::Result<()> {
    debug!(words = ?args.input.words, tracked = ?args.input.tracked, "executing export command");

    let (words, tracked) = ctx.load_inputs(&args.input)?;

    let plan = export::plan_export(
        &words,
        &tracked,
        args.mode,
        ctx.config.beginner_threshold(),
    )
    .context("nothing to export")?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "{} {} words, {} mode ({} card{} each)",
        "Deck:".bold(),
        plan.word_count,
        plan.mode.cyan(),
        plan.cards_per_word,
        if plan.cards_per_word == 1 { "" } else { "s" }
    );
    for template in &plan.card_templates {
        println!("  {} {}", "-".dimmed(), template);
    }

    if args.notes {
        println!();
        for note in &plan.notes {
            println!(
                "{}  {}  HSK {}  {}  {}",
                note.guid.dimmed(),
                note.id,
                note.hsk_level,
                note.pinyin,
                note.meaning
            );
        }
    }

    Ok(())
}
