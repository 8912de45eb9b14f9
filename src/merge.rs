//! Merging per-card PDFs into a single printable document
//!
//! Relies on the external `pdftk` and `pdfjam` tools.

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{bail, Context};
use tracing::info;

/// Ask a yes/no question; anything but `y` means no
pub fn confirm<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn run(command: &mut Command) -> anyhow::Result<()> {
    let program = command.get_program().to_string_lossy().into_owned();
    let status = command
        .status()
        .with_context(|| format!("Could not run `{}`", program))?;
    if !status.success() {
        bail!("`{}` failed with {}", program, status);
    }
    Ok(())
}

/// `pdftk <files…> cat output <combined>`
fn concat_command(files: &[PathBuf], combined: &Path) -> Command {
    let mut command = Command::new("pdftk");
    command.args(files).arg("cat").arg("output").arg(combined);
    command
}

/// `pdfjam --outfile <a4> --paper a4paper <combined>`
fn repaginate_command(combined: &Path, a4: &Path) -> Command {
    let mut command = Command::new("pdfjam");
    command
        .arg("--outfile")
        .arg(a4)
        .arg("--paper")
        .arg("a4paper")
        .arg(combined);
    command
}

/// Concatenate `files` into `out_dir/out.pdf`, then repaginate it onto A4
/// paper as `out_dir/a4.pdf`
///
/// Returns the path of the A4 document.
pub fn merge_pdfs(files: &[PathBuf], out_dir: &Path) -> anyhow::Result<PathBuf> {
    let combined = out_dir.join("out.pdf");
    let a4 = out_dir.join("a4.pdf");

    run(&mut concat_command(files, &combined))?;
    info!(path = %combined.display(), pages = files.len(), "Combined cards");

    run(&mut repaginate_command(&combined, &a4))?;
    info!(path = %a4.display(), "Repaginated for A4");

    Ok(a4)
}
