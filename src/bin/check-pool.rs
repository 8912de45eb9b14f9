//! CLI for checking a prompt pool before generating cards

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use clap::Parser;
use icebreaker_bingo::{fit, Pool};
use itertools::Itertools;

/// Check that every prompt fits into a bingo card cell
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print every prompt the way it is wrapped on the card
    #[arg(short, long)]
    show: bool,

    /// File with one prompt per line. Use `-` for stdin.
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let pool = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Pool::parse(&buf)
    } else {
        Pool::load(&args.file)?
    };

    if args.show {
        for item in pool.items() {
            let lines = fit::wrap(item, fit::WRAP_WIDTH);
            println!("{}\n", lines.iter().join("\n"));
        }
    }
    pool.verify_fit()?;
    println!(
        "All {} prompts fit into {} lines of {} characters.",
        pool.len(),
        fit::MAX_LINES,
        fit::WRAP_WIDTH
    );
    Ok(())
}
