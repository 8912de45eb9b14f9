//! Generation of a whole batch of cards

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use tracing::{debug, info};

use crate::{
    cell_count,
    layout::{Captions, PageGeometry, PageLayout},
    naming::{FileNamer, NamingScheme, RANDOM_TAGS},
    render::OutputFormat,
    BingoError, CardSampler, Pool,
};

/// Settings of one generation run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory that receives the cards; emptied before generation
    pub out_dir: PathBuf,
    /// Number of cards
    pub count: usize,
    /// Grid dimension; each card has `dim * dim` cells
    pub dim: usize,
    pub format: OutputFormat,
    pub naming: NamingScheme,
    /// Rule and prize texts, or `None` for a bare grid
    pub captions: Option<Captions>,
    /// Random seed
    pub seed: Option<u64>,
    /// TrueType font for raster output
    pub font: Option<PathBuf>,
    pub geometry: PageGeometry,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("figs"),
            count: 80,
            dim: 5,
            format: OutputFormat::Pdf,
            naming: NamingScheme::Sequential,
            captions: Some(Captions::default()),
            seed: None,
            font: None,
            geometry: PageGeometry::default(),
        }
    }
}

/// Remove every file in `dir`, creating the directory if it is missing
///
/// Returns the number of removed files and symlinks. Subdirectories are
/// left alone.
pub fn clear_output_dir(dir: &Path) -> anyhow::Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("Could not create {}", dir.display()))?;

    let mut removed = 0;
    for entry in fs::read_dir(dir).with_context(|| format!("Could not list {}", dir.display()))? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_file() || file_type.is_symlink() {
            let path = entry.path();
            fs::remove_file(&path)
                .with_context(|| format!("Could not remove {}", path.display()))?;
            debug!(path = %path.display(), "Removed stale file");
            removed += 1;
        }
    }
    Ok(removed)
}

/// Generate `config.count` cards from `pool`
///
/// The whole pool is checked first; nothing is removed or written if a
/// candidate does not fit a cell or the pool is too small. Returns the
/// written files in card order.
pub fn generate(pool: &Pool, config: &BatchConfig) -> anyhow::Result<Vec<PathBuf>> {
    ensure!(config.count > 0, "Card count must be positive");
    ensure!(config.dim > 0, "Grid dimension must be positive");
    ensure!(
        config.naming != NamingScheme::RandomTag || config.count <= RANDOM_TAGS,
        "At most {} cards can be named with random tags",
        RANDOM_TAGS
    );

    pool.verify_fit()?;
    let needed = cell_count(config.dim)?;
    if pool.len() < needed {
        return Err(BingoError::PoolTooSmall {
            needed,
            available: pool.len(),
        }
        .into());
    }
    info!(items = pool.len(), "All candidates fit");

    let renderer = config.format.renderer(config.font.as_deref())?;

    let removed = clear_output_dir(&config.out_dir)?;
    info!(removed, dir = %config.out_dir.display(), "Cleared output directory");

    let mut sampler = CardSampler::new(config.seed);
    let mut namer = FileNamer::new(config.naming, config.count, config.format.extension());
    let mut written = Vec::with_capacity(config.count);
    for n in 1..=config.count {
        let card = sampler.sample(pool, config.dim)?;
        let page = PageLayout::for_card(&card, &config.geometry, config.captions.as_ref())?;
        let path = config.out_dir.join(namer.name(n, &mut sampler));
        renderer
            .render(&page, &path)
            .with_context(|| format!("Could not render card {}", n))?;
        debug!(card = n, path = %path.display(), "Rendered card");
        written.push(path);
    }

    info!(cards = written.len(), dir = %config.out_dir.display(), "Generated cards");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, fs, path::Path};

    use super::{clear_output_dir, generate, BatchConfig};
    use crate::{naming::NamingScheme, BingoError, Pool};

    fn names(n: usize) -> Pool {
        Pool::from_items((1..=n).map(|i| format!("Guest number {i}")))
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    fn config(dir: &Path, count: usize) -> BatchConfig {
        BatchConfig {
            out_dir: dir.join("figs"),
            count,
            seed: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn generates_one_sequentially_named_file_per_card() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), 12);

        let written = generate(&names(30), &config).unwrap();

        assert_eq!(written.len(), 12);
        assert_eq!(written[0], config.out_dir.join("01.pdf"));
        assert_eq!(written[11], config.out_dir.join("12.pdf"));
        let expected: Vec<_> = (1..=12).map(|n| format!("{:02}.pdf", n)).collect();
        assert_eq!(listing(&config.out_dir), expected);
    }

    #[test]
    fn stale_files_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), 3);
        fs::create_dir_all(config.out_dir.join("keep")).unwrap();
        fs::write(config.out_dir.join("99.pdf"), b"old").unwrap();
        fs::write(config.out_dir.join("out.pdf"), b"old").unwrap();

        generate(&names(25), &config).unwrap();

        assert_eq!(listing(&config.out_dir), ["1.pdf", "2.pdf", "3.pdf", "keep"]);
    }

    #[test]
    fn random_tag_names() {
        let dir = tempfile::tempdir().unwrap();
        let config = BatchConfig {
            naming: NamingScheme::RandomTag,
            captions: None,
            ..config(dir.path(), 20)
        };

        let written = generate(&names(25), &config).unwrap();

        let distinct: HashSet<_> = written.iter().collect();
        assert_eq!(distinct.len(), 20);
        for path in &written {
            assert_eq!(path.extension().unwrap(), "pdf");
            assert_eq!(path.file_stem().unwrap().len(), 4);
            assert!(path.exists());
        }
    }

    #[test]
    fn oversized_candidate_aborts_before_touching_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), 3);
        fs::create_dir_all(&config.out_dir).unwrap();
        fs::write(config.out_dir.join("01.pdf"), b"previous run").unwrap();

        let long = "much too long ".repeat(10);
        let mut items: Vec<String> = names(30).items().to_vec();
        items.push(long);
        let err = generate(&Pool::from_items(items), &config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BingoError>(),
            Some(BingoError::Overflow { .. })
        ));
        assert_eq!(listing(&config.out_dir), ["01.pdf"]);
    }

    #[test]
    fn too_small_pool_aborts_before_touching_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), 2);

        let err = generate(&names(10), &config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BingoError>(),
            Some(BingoError::PoolTooSmall {
                needed: 25,
                available: 10
            })
        ));
        assert!(!config.out_dir.exists());
    }

    #[test]
    fn oversized_grid_aborts_before_touching_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = BatchConfig {
            dim: 1 << (usize::BITS / 2),
            ..config(dir.path(), 1)
        };

        let err = generate(&names(30), &config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BingoError>(),
            Some(BingoError::GridTooLarge { .. })
        ));
        assert!(!config.out_dir.exists());
    }

    #[test]
    fn zero_cards_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(generate(&names(25), &config(dir.path(), 0)).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn stale_symlinks_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("figs");
        fs::create_dir_all(&out).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.pdf"), out.join("01.pdf")).unwrap();
        std::os::unix::fs::symlink(dir.path(), out.join("parent")).unwrap();

        assert_eq!(clear_output_dir(&out).unwrap(), 2);
        assert!(listing(&out).is_empty());
        assert!(dir.path().is_dir());
    }

    #[test]
    fn clear_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a/b");
        assert_eq!(clear_output_dir(&out).unwrap(), 0);
        assert!(out.is_dir());
    }
}
