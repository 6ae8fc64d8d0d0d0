//! Glyph collector used while interpreting a page.

use hayro_interpret::font::Glyph;
use hayro_interpret::{
    BlendMode, ClipPath, Device, GlyphDrawMode, Image, Paint, PathDrawMode, SoftMask,
};
use kurbo::{Affine, Rect, Shape};

/// Minimum vertical overlap (relative to the smaller glyph) for two glyphs
/// to sit on the same line.
const SAME_LINE_OVERLAP_RATIO: f64 = 0.5;

/// A horizontal gap wider than this fraction of the glyph height splits words.
const WORD_GAP_RATIO: f64 = 0.25;

#[derive(Debug, Clone, Copy)]
struct PageGlyph {
    ch: Option<char>,
    bbox: Option<Rect>,
}

/// Records glyphs in emission order and rebuilds whitespace from geometry,
/// since many documents never draw an explicit space.
#[derive(Debug, Default)]
pub(crate) struct PageTextDevice {
    glyphs: Vec<PageGlyph>,
}

impl PageTextDevice {
    /// Whitespace-separated tokens of the page, in drawing order
    pub(crate) fn tokens(&self) -> Vec<String> {
        self.to_text()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        let mut last_bbox: Option<Rect> = None;

        for glyph in &self.glyphs {
            if let (Some(prev), Some(cur)) = (last_bbox, glyph.bbox) {
                if !is_same_line(prev, cur) {
                    out.push('\n');
                } else {
                    let gap = cur.x0 - prev.x1;
                    let threshold = WORD_GAP_RATIO * 0.5 * (prev.height() + cur.height());
                    if gap > 0.0 && gap > threshold {
                        out.push(' ');
                    }
                }
            }

            if let Some(ch) = glyph.ch {
                out.push(ch);
            }

            if glyph.bbox.is_some() {
                last_bbox = glyph.bbox;
            }
        }

        out
    }

    #[cfg(test)]
    fn push(&mut self, ch: char, bbox: Rect) {
        self.glyphs.push(PageGlyph {
            ch: Some(ch),
            bbox: Some(bbox),
        });
    }
}

fn is_same_line(a: Rect, b: Rect) -> bool {
    let overlap = a.y1.min(b.y1) - a.y0.max(b.y0);
    if overlap <= 0.0 {
        return false;
    }

    let denom = a.height().min(b.height());
    if denom <= 0.0 {
        return false;
    }

    (overlap / denom) >= SAME_LINE_OVERLAP_RATIO
}

impl<'a> Device<'a> for PageTextDevice {
    fn set_soft_mask(&mut self, _mask: Option<SoftMask<'a>>) {}

    fn set_blend_mode(&mut self, _blend_mode: BlendMode) {}

    fn draw_path(
        &mut self,
        _path: &kurbo::BezPath,
        _transform: Affine,
        _paint: &Paint<'a>,
        _draw_mode: &PathDrawMode,
    ) {
    }

    fn push_clip_path(&mut self, _clip_path: &ClipPath) {}

    fn push_transparency_group(
        &mut self,
        _opacity: f32,
        _mask: Option<SoftMask<'a>>,
        _blend_mode: BlendMode,
    ) {
    }

    fn draw_glyph(
        &mut self,
        glyph: &Glyph<'a>,
        transform: Affine,
        glyph_transform: Affine,
        _paint: &Paint<'a>,
        _draw_mode: &GlyphDrawMode,
    ) {
        // Type3 glyphs have no outline to measure without running their program.
        let bbox = match glyph {
            Glyph::Outline(og) => {
                let path_in_page = transform * (glyph_transform * og.outline());
                Some(path_in_page.bounding_box())
            }
            Glyph::Type3(_) => None,
        };

        self.glyphs.push(PageGlyph {
            ch: glyph.as_unicode(),
            bbox,
        });
    }

    fn draw_image(&mut self, _image: Image<'a, '_>, _transform: Affine) {}

    fn pop_clip_path(&mut self) {}

    fn pop_transparency_group(&mut self) {}
}
