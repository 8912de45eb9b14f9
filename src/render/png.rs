use std::{
    fs,
    path::{Path, PathBuf},
};

use ab_glyph::{FontVec, PxScale};
use anyhow::{anyhow, bail, Context};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut, text_size};
use tracing::debug;

use super::CardRenderer;
use crate::layout::{GridLine, PageGeometry, PageLayout};

/// Fonts tried when no font is given explicitly
const FONT_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Raster card, rendered with a TrueType font
pub struct PngRenderer {
    font: FontVec,
}

impl PngRenderer {
    /// Load font from `font`, or from the first existing system font
    pub fn new(font: Option<&Path>) -> anyhow::Result<Self> {
        let path = match font {
            Some(path) => path.to_path_buf(),
            None => Self::find_system_font()?,
        };
        debug!(font = %path.display(), "Loading font");
        let bytes =
            fs::read(&path).with_context(|| format!("Could not read font {}", path.display()))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|_| anyhow!("{} is not a valid TrueType font", path.display()))?;
        Ok(Self { font })
    }

    fn find_system_font() -> anyhow::Result<PathBuf> {
        match FONT_CANDIDATES.iter().map(|p| PathBuf::from(*p)).find(|p| p.exists()) {
            Some(path) => Ok(path),
            None => bail!("No system font found, please give one with --font"),
        }
    }
}

/// Page inches to pixel coordinates (origin at the top left corner)
fn to_px(geometry: &PageGeometry, (x, y): (f32, f32)) -> (f32, f32) {
    let dpi = geometry.dpi as f32;
    (x * dpi, (geometry.height - y) * dpi)
}

fn pt_to_px(geometry: &PageGeometry, pt: f32) -> f32 {
    pt / 72.0 * geometry.dpi as f32
}

/// Draw a thick, optionally dotted line as parallel one pixel segments
fn draw_line(image: &mut RgbImage, geometry: &PageGeometry, line: &GridLine) {
    let (x0, y0) = to_px(geometry, line.start);
    let (x1, y1) = to_px(geometry, line.end);
    let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    if length == 0.0 {
        return;
    }
    let (dx, dy) = ((x1 - x0) / length, (y1 - y0) / length);
    let (nx, ny) = (-dy, dx);

    let thickness = pt_to_px(geometry, line.style.width_pt()).round().max(1.0);
    let level = (line.style.gray() * 255.0).round() as u8;
    let color = Rgb([level, level, level]);

    let (dash, gap) = if line.style.is_dotted() {
        (thickness, 2.0 * thickness)
    } else {
        (length, 0.0)
    };

    let steps = thickness as usize;
    for k in 0..steps {
        let offset = k as f32 - (thickness - 1.0) / 2.0;
        let (ox, oy) = (nx * offset, ny * offset);
        let mut pos = 0.0;
        while pos < length {
            let end = (pos + dash).min(length);
            draw_line_segment_mut(
                image,
                (x0 + dx * pos + ox, y0 + dy * pos + oy),
                (x0 + dx * end + ox, y0 + dy * end + oy),
                color,
            );
            pos = end + gap;
        }
    }
}

impl CardRenderer for PngRenderer {
    fn render(&self, page: &PageLayout, path: &Path) -> anyhow::Result<()> {
        let geometry = &page.geometry;
        let mut image = RgbImage::from_pixel(geometry.width_px(), geometry.height_px(), WHITE);

        for line in &page.lines {
            draw_line(&mut image, geometry, line);
        }

        for block in &page.texts {
            let scale = PxScale::from(pt_to_px(geometry, block.font_pt));
            for (text, center) in block.lines.iter().zip(block.line_centers()) {
                let (width, _) = text_size(scale, &self.font, text);
                let (cx, cy) = to_px(geometry, (block.x, center));
                draw_text_mut(
                    &mut image,
                    Rgb([0, 0, 0]),
                    (cx - width as f32 / 2.0).round() as i32,
                    (cy - scale.y / 2.0).round() as i32,
                    scale,
                    &self.font,
                    text,
                );
            }
        }

        image
            .save(path)
            .with_context(|| format!("Could not write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::{draw_line, PngRenderer, WHITE};
    use crate::layout::{GridLine, LineStyle, PageGeometry};

    #[test]
    fn major_line_is_solid_black() {
        let geometry = PageGeometry::default();
        let mut image = RgbImage::from_pixel(geometry.width_px(), geometry.height_px(), WHITE);
        let line = GridLine {
            start: (1.0, 4.5),
            end: (7.0, 4.5),
            style: LineStyle::Major,
        };
        draw_line(&mut image, &geometry, &line);

        // 4.5 in from the bottom of a 9 in page is the middle row
        assert_eq!(*image.get_pixel(800, 900), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(100, 900), WHITE);
    }

    #[test]
    fn minor_line_has_gaps() {
        let geometry = PageGeometry::default();
        let mut image = RgbImage::from_pixel(geometry.width_px(), geometry.height_px(), WHITE);
        let line = GridLine {
            start: (1.0, 4.5),
            end: (7.0, 4.5),
            style: LineStyle::Minor,
        };
        draw_line(&mut image, &geometry, &line);

        let row: Vec<_> = (200..1400).map(|x| *image.get_pixel(x, 900)).collect();
        assert!(row.iter().any(|p| *p == WHITE));
        assert!(row.iter().any(|p| *p == Rgb([128, 128, 128])));
    }

    #[test]
    fn missing_font_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.ttf");
        assert!(PngRenderer::new(Some(path.as_path())).is_err());
    }
}
