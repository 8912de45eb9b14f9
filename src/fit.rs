//! Fit check: does a candidate fit into a single grid cell?

use itertools::Itertools;
use textwrap::{Options, WordSeparator, WrapAlgorithm};

use crate::BingoError;

/// Column width that cell text is wrapped to
pub const WRAP_WIDTH: usize = 20;

/// Number of wrapped lines a cell can display
pub const MAX_LINES: usize = 5;

/// Greedy word wrap
///
/// Words longer than `width` are broken, embedded line breaks are kept.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let options = Options::new(width)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Wrap `text` to [WRAP_WIDTH] columns and check that it fits a cell.
///
/// Returns the wrapped lines, or [BingoError::Overflow] carrying the
/// wrapped text if it needs more than [MAX_LINES] lines.
///
/// # Examples
/// ```
/// use icebreaker_bingo::fit::fit_text;
///
/// let lines = fit_text("Has been to more than three continents").unwrap();
/// assert_eq!(lines, ["Has been to more", "than three", "continents"]);
/// ```
pub fn fit_text(text: &str) -> Result<Vec<String>, BingoError> {
    let lines = wrap(text, WRAP_WIDTH);
    if lines.len() > MAX_LINES {
        return Err(BingoError::Overflow {
            wrapped: lines.iter().join("\n"),
            max_lines: MAX_LINES,
        });
    }
    Ok(lines)
}
