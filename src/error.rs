use std::path::PathBuf;

use thiserror::Error;

/// Failures of the card generation pipeline
#[derive(Error, Debug)]
pub enum BingoError {
    /// The pool file does not exist.
    #[error("File '{}' not found", .path.display())]
    PoolNotFound { path: PathBuf },

    /// The pool file exists but could not be read.
    #[error("could not read pool file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate does not fit into a cell.
    #[error("{wrapped:?} wraps to more than {max_lines} lines, so it doesn't fit!")]
    Overflow { wrapped: String, max_lines: usize },

    /// The number of cells of a `dim * dim` grid does not fit in `usize`.
    #[error("a {dim}x{dim} grid has too many cells")]
    GridTooLarge { dim: usize },

    /// Not enough distinct candidates for one card.
    #[error("a card needs {needed} distinct items, but the pool only has {available}")]
    PoolTooSmall { needed: usize, available: usize },
}
