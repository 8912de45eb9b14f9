//! Candidate pool loading and validation

use std::{fs, io, path::Path};

use itertools::Itertools;
use tracing::debug;

use crate::{fit::fit_text, BingoError};

/// Candidate prompts that cards are sampled from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pool {
    items: Vec<String>,
}

impl Pool {
    /// Read pool from a newline-delimited text file
    ///
    /// Returns [BingoError::PoolNotFound] if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, BingoError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let pool = Self::parse(&text);
                debug!(path = %path.display(), items = pool.len(), "Loaded pool");
                Ok(pool)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(BingoError::PoolNotFound {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(BingoError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse pool from text, one candidate per line
    ///
    /// Lines are trimmed, blank lines and repeated candidates skipped. A
    /// literal `\n` inside a line becomes a line break.
    pub fn parse(text: &str) -> Self {
        Self::from_items(text.lines())
    }

    /// Build pool from individual candidates, applying the same cleanup
    /// as [Self::parse]
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = items
            .into_iter()
            .map(|item| item.as_ref().trim().replace("\\n", "\n"))
            .filter(|item| !item.is_empty())
            .unique()
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check that every candidate fits into a cell.
    ///
    /// Fails on the first candidate that wraps to too many lines.
    pub fn verify_fit(&self) -> Result<(), BingoError> {
        for item in &self.items {
            fit_text(item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use super::Pool;
    use crate::BingoError;

    #[test]
    fn parse_trims_and_skips_blank_lines() {
        let pool = Pool::parse("  Has a pet  \n\nSpeaks three languages\r\n   \n");
        assert_eq!(pool.items(), ["Has a pet", "Speaks three languages"]);
    }

    #[test]
    fn repeated_candidates_are_kept_once() {
        let pool = Pool::parse("Alice\nBob\nAlice\n Bob ");
        assert_eq!(pool.items(), ["Alice", "Bob"]);
    }

    #[test]
    fn literal_newlines_become_line_breaks() {
        let pool = Pool::parse(r"Was born\nabroad");
        assert_eq!(pool.items(), ["Was born\nabroad"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Pool::load(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(matches!(err, BingoError::PoolNotFound { .. }));
        assert_eq!(err.to_string(), "File 'does/not/exist.txt' not found");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.txt");
        fs::write(&path, "Alice\nBob\nCarol\n").unwrap();

        let pool = Pool::load(&path).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.items()[2], "Carol");
    }

    #[test]
    fn verify_fit_rejects_oversized_candidate() {
        let long = "long word ".repeat(20);
        let pool = Pool::from_items(["Alice", long.as_str(), "Bob"]);
        assert!(matches!(
            pool.verify_fit(),
            Err(BingoError::Overflow { .. })
        ));
    }

    #[test]
    fn verify_fit_accepts_short_candidates() {
        let pool = Pool::from_items(["Alice", "Bob", "Has run a marathon"]);
        assert!(pool.verify_fit().is_ok());
    }
}
