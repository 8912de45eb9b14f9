//! Printable "human bingo" cards
//!
//! Every card is a square grid whose cells hold icebreaker prompts, drawn
//! at random from a pool. Players walk around, find a person matching a
//! prompt and write their name in the upper half of the cell.
//!
//! # Examples
//! ```
//! use icebreaker_bingo::{layout::{PageGeometry, PageLayout}, CardSampler, Pool};
//!
//! let pool = Pool::parse("
//! Has a dog
//! Speaks three languages
//! Was born in another country
//! Has run a marathon");
//! pool.verify_fit().unwrap();
//!
//! let mut sampler = CardSampler::new(Some(0));
//! let card = sampler.sample(&pool, 2).unwrap();
//! assert_eq!(card.cells().len(), 4);
//!
//! let page = PageLayout::for_card(&card, &PageGeometry::default(), None).unwrap();
//! assert_eq!(page.lines.len(), 8);
//! ```

pub mod batch;
mod card;
mod error;
pub mod fit;
pub mod layout;
pub mod merge;
pub mod naming;
mod pool;
pub mod render;

pub use card::{cell_count, Card, CardSampler};
pub use error::BingoError;
pub use pool::Pool;
