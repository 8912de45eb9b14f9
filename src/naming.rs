//! Output file names

use std::collections::HashSet;

use clap::ValueEnum;

use crate::CardSampler;

/// Number of distinct four-digit tags
pub const RANDOM_TAGS: usize = 9000;

/// How generated card files are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamingScheme {
    /// Card number, zero padded to the width of the card count
    Sequential,
    /// Random four-digit number
    RandomTag,
}

/// Zero-padded card number
///
/// # Examples
/// ```
/// use icebreaker_bingo::naming::sequential_name;
///
/// assert_eq!(sequential_name(1, 80, "pdf"), "01.pdf");
/// assert_eq!(sequential_name(80, 80, "pdf"), "80.pdf");
/// ```
pub fn sequential_name(n: usize, total: usize, extension: &str) -> String {
    let width = total.to_string().len();
    format!("{:0width$}.{}", n, extension, width = width)
}

/// Hands out file names for one run
pub struct FileNamer {
    scheme: NamingScheme,
    total: usize,
    extension: &'static str,
    used_tags: HashSet<u16>,
}

impl FileNamer {
    pub fn new(scheme: NamingScheme, total: usize, extension: &'static str) -> Self {
        Self {
            scheme,
            total,
            extension,
            used_tags: HashSet::new(),
        }
    }

    /// Name of card number `n` (1-based)
    ///
    /// Random tags are not repeated within a run, so at most [RANDOM_TAGS]
    /// names can be handed out with [NamingScheme::RandomTag].
    pub fn name(&mut self, n: usize, sampler: &mut CardSampler) -> String {
        match self.scheme {
            NamingScheme::Sequential => sequential_name(n, self.total, self.extension),
            NamingScheme::RandomTag => {
                let tag = loop {
                    let tag = sampler.random_tag();
                    if self.used_tags.insert(tag) {
                        break tag;
                    }
                };
                format!("{}.{}", tag, self.extension)
            }
        }
    }
}
