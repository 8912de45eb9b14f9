use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use printpdf::{
    BuiltinFont, Color, Line, LineDashPattern, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use super::CardRenderer;
use crate::layout::{GridLine, PageLayout};

const MM_PER_INCH: f32 = 25.4;

/// Helvetica advance widths of the printable ASCII characters, starting
/// at the space, in thousandths of the font size
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Width used for characters outside printable ASCII
const HELVETICA_FALLBACK: u16 = 556;

/// Width of `text` set in Helvetica at `font_pt`, inches
fn helvetica_width(text: &str, font_pt: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            (c as usize)
                .checked_sub(' ' as usize)
                .and_then(|i| HELVETICA_WIDTHS.get(i))
                .copied()
                .unwrap_or(HELVETICA_FALLBACK) as u32
        })
        .sum();
    units as f32 / 1000.0 * font_pt / 72.0
}

/// Distance from the middle of a line of text down to its baseline,
/// relative to font size
const BASELINE_DROP: f32 = 0.35;

/// Single page PDF per card, using the built-in Helvetica font
pub struct PdfRenderer {
    title: String,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            title: "Human bingo".to_string(),
        }
    }
}

fn mm(inches: f32) -> Mm {
    Mm(inches * MM_PER_INCH)
}

fn draw_line(layer: &PdfLayerReference, line: &GridLine) {
    let gray = line.style.gray();
    layer.set_outline_color(Color::Rgb(Rgb::new(gray, gray, gray, None)));
    layer.set_outline_thickness(line.style.width_pt());
    layer.set_line_dash_pattern(if line.style.is_dotted() {
        LineDashPattern {
            dash_1: Some(1),
            gap_1: Some(2),
            ..Default::default()
        }
    } else {
        LineDashPattern::default()
    });
    layer.add_line(Line {
        points: vec![
            (Point::new(mm(line.start.0), mm(line.start.1)), false),
            (Point::new(mm(line.end.0), mm(line.end.1)), false),
        ],
        is_closed: false,
    });
}

impl CardRenderer for PdfRenderer {
    fn render(&self, page: &PageLayout, path: &Path) -> anyhow::Result<()> {
        let geometry = &page.geometry;
        let (doc, page_idx, layer_idx) = PdfDocument::new(
            self.title.clone(),
            mm(geometry.width),
            mm(geometry.height),
            "Card",
        );
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| anyhow!("Could not load Helvetica: {:?}", err))?;

        for line in &page.lines {
            draw_line(&layer, line);
        }

        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        for block in &page.texts {
            for (text, center) in block.lines.iter().zip(block.line_centers()) {
                let width = helvetica_width(text, block.font_pt);
                let baseline = center - BASELINE_DROP * block.font_pt / 72.0;
                layer.use_text(
                    text.as_str(),
                    block.font_pt,
                    mm(block.x - width / 2.0),
                    mm(baseline),
                    &font,
                );
            }
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|err| anyhow!("Could not encode {}: {:?}", path.display(), err))?;
        fs::write(path, bytes).with_context(|| format!("Could not write {}", path.display()))
    }
}
