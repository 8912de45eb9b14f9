//! Card sampling

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

use crate::{BingoError, Pool};

/// Number of cells of a `dim * dim` grid
pub fn cell_count(dim: usize) -> Result<usize, BingoError> {
    dim.checked_mul(dim).ok_or(BingoError::GridTooLarge { dim })
}

/// One bingo card: `dim * dim` candidates, no candidate twice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    dim: usize,
    /// Cell contents, index `row * dim + col`
    cells: Vec<String>,
}

impl Card {
    /// Grid dimension
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Candidate in the cell at horizontal position `row`, vertical
    /// position `col` (counted from the bottom)
    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.cells[row * self.dim + col]
    }
}

/// Random card generator
pub struct CardSampler {
    random: StdRng,
}

impl CardSampler {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Draw a card of `dim * dim` distinct candidates from `pool`
    ///
    /// Each call samples independently; consecutive cards may share
    /// candidates.
    pub fn sample(&mut self, pool: &Pool, dim: usize) -> Result<Card, BingoError> {
        let needed = cell_count(dim)?;
        if pool.len() < needed {
            return Err(BingoError::PoolTooSmall {
                needed,
                available: pool.len(),
            });
        }
        let cells = index::sample(&mut self.random, pool.len(), needed)
            .into_iter()
            .map(|i| pool.items()[i].clone())
            .collect();
        Ok(Card { dim, cells })
    }

    /// Random four-digit number
    pub fn random_tag(&mut self) -> u16 {
        self.random.gen_range(1000..=9999)
    }
}
