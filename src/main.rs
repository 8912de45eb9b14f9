//! CLI for bingo card generation

use std::{io, path::PathBuf};

use clap::Parser;
use icebreaker_bingo::{
    batch::{generate, BatchConfig},
    layout::{Captions, PageGeometry},
    merge::{confirm, merge_pdfs},
    naming::NamingScheme,
    render::OutputFormat,
    Pool,
};
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Human bingo cards from a list of icebreaker prompts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File with one prompt per line
    #[arg(default_value = "features.txt")]
    pool: PathBuf,

    /// Number of cards
    #[arg(short = 'n', long, default_value_t = 80)]
    count: usize,

    /// Grid dimension
    #[arg(short, long, default_value_t = 5)]
    dim: usize,

    /// Output directory. Existing files in it are deleted!
    #[arg(short, long, default_value = "figs")]
    out_dir: PathBuf,

    /// Output file format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pdf)]
    format: OutputFormat,

    /// File naming scheme
    #[arg(long, value_enum, default_value_t = NamingScheme::Sequential)]
    naming: NamingScheme,

    /// Leave out the rules and prize texts
    #[arg(long)]
    no_captions: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// TrueType font for PNG output
    #[arg(long)]
    font: Option<PathBuf>,

    /// Combine the cards into a single A4 PDF without asking
    #[arg(long, conflicts_with = "no_merge")]
    merge: bool,

    /// Never combine the cards
    #[arg(long)]
    no_merge: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let pool = Pool::load(&args.pool)?;
    let config = BatchConfig {
        out_dir: args.out_dir,
        count: args.count,
        dim: args.dim,
        format: args.format,
        naming: args.naming,
        captions: (!args.no_captions).then(Captions::default),
        seed: args.seed,
        font: args.font,
        geometry: PageGeometry::default(),
    };
    let files = generate(&pool, &config)?;

    let merge = match merge_plan(config.format, args.merge, args.no_merge) {
        MergePlan::Merge => true,
        MergePlan::Ask => confirm(
            "Do you wish to combine all the output image files to a single PDF? [y/N]: ",
            &mut io::stdin().lock(),
            &mut io::stdout(),
        )?,
        MergePlan::Skip => false,
        MergePlan::Unsupported => {
            warn!("Merging is only available for PDF output");
            false
        }
    };
    if merge {
        let merged = merge_pdfs(&files, &config.out_dir)?;
        info!(path = %merged.display(), "Wrote combined document");
    }
    Ok(())
}

/// What happens with the cards after generation
#[derive(Debug, PartialEq, Eq)]
enum MergePlan {
    Merge,
    Ask,
    Skip,
    /// `--merge` was given for a format that cannot be merged
    Unsupported,
}

fn merge_plan(format: OutputFormat, merge: bool, no_merge: bool) -> MergePlan {
    match (format, merge, no_merge) {
        (OutputFormat::Pdf, true, _) => MergePlan::Merge,
        (OutputFormat::Pdf, false, false) => MergePlan::Ask,
        (OutputFormat::Pdf, false, true) => MergePlan::Skip,
        (OutputFormat::Png, true, _) => MergePlan::Unsupported,
        (OutputFormat::Png, false, _) => MergePlan::Skip,
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
