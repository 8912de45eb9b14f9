//! Card geometry, independent of the output format
//!
//! The grid is laid out over a unit square ("grid units", origin at the
//! lower left corner), which [PageGeometry] maps onto the page in inches,
//! again with the origin at the lower left corner of the page.

use crate::{fit::fit_text, BingoError, Card};

/// Default font size of cell text, points
pub const CELL_FONT_PT: f32 = 8.33;

/// Default font size of captions, points
pub const CAPTION_FONT_PT: f32 = 12.0;

/// Distance between baselines, relative to font size
pub const LINE_SPACING: f32 = 1.2;

/// Style of a grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Solid black cell boundary
    Major,
    /// Dotted gray line splitting a cell into name and prompt halves
    Minor,
}

impl LineStyle {
    /// Line width, points
    pub fn width_pt(&self) -> f32 {
        match self {
            LineStyle::Major => 1.5,
            LineStyle::Minor => 1.0,
        }
    }

    /// Gray level, 0 is black and 1 white
    pub fn gray(&self) -> f32 {
        match self {
            LineStyle::Major => 0.0,
            LineStyle::Minor => 0.5,
        }
    }

    pub fn is_dotted(&self) -> bool {
        matches!(self, LineStyle::Minor)
    }
}

/// Straight line from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub style: LineStyle,
}

/// Grid lines and cell text anchors over the unit square
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    dim: usize,
}

impl GridLayout {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// `2 * dim + 1` horizontal lines, alternating major and minor,
    /// followed by `dim + 1` major vertical lines
    pub fn lines(&self) -> Vec<GridLine> {
        let d = self.dim as f32;
        let horizontal = (0..=2 * self.dim).map(|j| {
            let y = j as f32 / (2.0 * d);
            GridLine {
                start: (0.0, y),
                end: (1.0, y),
                style: if j % 2 == 1 {
                    LineStyle::Minor
                } else {
                    LineStyle::Major
                },
            }
        });
        let vertical = (0..=self.dim).map(|i| {
            let x = i as f32 / d;
            GridLine {
                start: (x, 0.0),
                end: (x, 1.0),
                style: LineStyle::Major,
            }
        });
        horizontal.chain(vertical).collect()
    }

    /// Centre of the prompt text in cell (`row`, `col`), i.e. the middle of
    /// the lower half of the cell
    pub fn text_anchor(&self, row: usize, col: usize) -> (f32, f32) {
        let d = self.dim as f32;
        (
            row as f32 / d + 1.0 / (2.0 * d),
            col as f32 / d + 1.0 / (4.0 * d),
        )
    }
}

/// Page size and grid placement, inches
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Lower left corner of the grid
    pub grid_origin: (f32, f32),
    /// Side length of the grid square
    pub grid_size: f32,
    /// Raster resolution, dots per inch
    pub dpi: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 9.0,
            grid_origin: (0.4, 0.9),
            grid_size: 7.2,
            dpi: 200,
        }
    }
}

impl PageGeometry {
    /// Map a point in grid units to page inches
    pub fn to_page(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (
            self.grid_origin.0 + x * self.grid_size,
            self.grid_origin.1 + y * self.grid_size,
        )
    }

    pub fn width_px(&self) -> u32 {
        (self.width * self.dpi as f32).round() as u32
    }

    pub fn height_px(&self) -> u32 {
        (self.height * self.dpi as f32).round() as u32
    }
}

/// Texts printed above and below the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captions {
    pub rules: String,
    pub prize: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            rules: "Rules: Fill 5 tiles on a line; maximum one person per row, column or diagonal"
                .to_string(),
            prize: "Come up to us to collect a big prize!".to_string(),
        }
    }
}

/// Which edge of a text block its anchor refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Center,
    Top,
    Bottom,
}

/// Horizontally centred lines of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    /// Anchor, page inches
    pub x: f32,
    pub y: f32,
    pub font_pt: f32,
    pub valign: VAlign,
}

impl TextBlock {
    /// Distance between consecutive lines, inches
    pub fn line_height(&self) -> f32 {
        self.font_pt * LINE_SPACING / 72.0
    }

    /// Vertical centre of each line, page inches, top line first
    pub fn line_centers(&self) -> Vec<f32> {
        let h = self.line_height();
        let total = h * self.lines.len() as f32;
        let top = match self.valign {
            VAlign::Center => self.y + total / 2.0,
            VAlign::Top => self.y,
            VAlign::Bottom => self.y + total,
        };
        (0..self.lines.len())
            .map(|i| top - h * (i as f32 + 0.5))
            .collect()
    }
}

/// Everything drawn on one card page, in page inches
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub geometry: PageGeometry,
    pub lines: Vec<GridLine>,
    pub texts: Vec<TextBlock>,
}

impl PageLayout {
    /// Lay out `card` on a page
    ///
    /// Cell texts are wrapped with [fit_text]; a cell that does not fit
    /// fails with [BingoError::Overflow].
    pub fn for_card(
        card: &Card,
        geometry: &PageGeometry,
        captions: Option<&Captions>,
    ) -> Result<Self, BingoError> {
        let grid = GridLayout::new(card.dim());

        let lines = grid
            .lines()
            .into_iter()
            .map(|line| GridLine {
                start: geometry.to_page(line.start),
                end: geometry.to_page(line.end),
                style: line.style,
            })
            .collect();

        let mut texts = Vec::with_capacity(card.cells().len() + 2);
        for row in 0..card.dim() {
            for col in 0..card.dim() {
                let (x, y) = geometry.to_page(grid.text_anchor(row, col));
                texts.push(TextBlock {
                    lines: fit_text(card.cell(row, col))?,
                    x,
                    y,
                    font_pt: CELL_FONT_PT,
                    valign: VAlign::Center,
                });
            }
        }

        if let Some(captions) = captions {
            let (x, y) = geometry.to_page((0.5, 1.025));
            texts.push(TextBlock {
                lines: vec![captions.rules.clone()],
                x,
                y,
                font_pt: CAPTION_FONT_PT,
                valign: VAlign::Bottom,
            });
            let (x, y) = geometry.to_page((0.5, -0.025));
            texts.push(TextBlock {
                lines: vec![captions.prize.clone()],
                x,
                y,
                font_pt: CAPTION_FONT_PT,
                valign: VAlign::Top,
            });
        }

        Ok(Self {
            geometry: geometry.clone(),
            lines,
            texts,
        })
    }
}
