//! Output formats

use std::path::Path;

use clap::ValueEnum;

use crate::layout::PageLayout;

mod pdf;
#[cfg(feature = "png")]
mod png;

pub use pdf::PdfRenderer;
#[cfg(feature = "png")]
pub use png::PngRenderer;

/// Writes a laid out card page to a file
pub trait CardRenderer {
    fn render(&self, page: &PageLayout, path: &Path) -> anyhow::Result<()>;
}

/// File format of the generated cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Vector page, one per card
    Pdf,
    /// Raster image, one per card (needs the `png` feature)
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
        }
    }

    /// Create renderer for this format
    ///
    /// - `font`: TrueType font for raster output. If not given, a few
    ///   common system locations are tried.
    pub fn renderer(&self, font: Option<&Path>) -> anyhow::Result<Box<dyn CardRenderer>> {
        match self {
            OutputFormat::Pdf => Ok(Box::new(PdfRenderer::default())),
            #[cfg(feature = "png")]
            OutputFormat::Png => Ok(Box::new(PngRenderer::new(font)?)),
            #[cfg(not(feature = "png"))]
            OutputFormat::Png => {
                let _ = font;
                anyhow::bail!("PNG output is not available, rebuild with `--features png`")
            }
        }
    }
}
