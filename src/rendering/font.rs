//! Font loading, text shaping and glyph outlines.

use rustybuzz::{Face as BuzzFace, GlyphBuffer, UnicodeBuffer};
use tiny_skia::{Path, PathBuilder, Transform};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::style::{TextAlign, TextBaseline};
use crate::core::error::{TextPathError, TextPathResult};

pub struct Font {
    face: Face<'static>,
    buzz_face: BuzzFace<'static>,
}

struct PathConverter(PathBuilder);

impl OutlineBuilder for PathConverter {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

impl Font {
    pub fn new(font_data: &'static [u8]) -> TextPathResult<Self> {
        let face = Face::parse(font_data, 0)
            .map_err(|e| TextPathError::FontParse(e.to_string()))?;
        let buzz_face = BuzzFace::from_slice(font_data, 0)
            .ok_or_else(|| TextPathError::FontParse("unsupported face".to_string()))?;
        Ok(Font { face, buzz_face })
    }

    pub fn shape(&self, text: &str) -> GlyphBuffer {
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        rustybuzz::shape(&self.buzz_face, &[], buffer)
    }

    pub fn face(&self) -> &Face<'static> {
        &self.face
    }

    /// Font units to pixels at `size`.
    fn scale(&self, size: f64) -> f64 {
        size / self.face.units_per_em() as f64
    }

    /// Advance width of `text` in pixels at `size`.
    pub fn measure(&self, text: &str, size: f64) -> f64 {
        let advance: i64 = self
            .shape(text)
            .glyph_positions()
            .iter()
            .map(|pos| pos.x_advance as i64)
            .sum();
        advance as f64 * self.scale(size)
    }

    /// Vertical shift that puts the requested baseline at y = 0 (y down).
    pub fn baseline_offset(&self, baseline: TextBaseline, size: f64) -> f64 {
        let scale = self.scale(size);
        let ascender = self.face.ascender() as f64;
        let descender = self.face.descender() as f64;
        match baseline {
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Top | TextBaseline::Hanging => ascender * scale,
            TextBaseline::Middle => (ascender + descender) / 2.0 * scale,
            TextBaseline::Bottom | TextBaseline::Ideographic => descender * scale,
        }
    }

    /// Outline of `text` in pixels, positioned for `align` and `baseline`
    /// relative to (x, y). Returns `None` for text without visible outlines.
    pub fn outline(
        &self,
        text: &str,
        size: f64,
        align: TextAlign,
        baseline: TextBaseline,
        x: f64,
        y: f64,
    ) -> Option<Path> {
        let shaped = self.shape(text);
        let scale = self.scale(size) as f32;

        let mut text_path_builder = PathBuilder::new();
        let mut current_x = 0.0;
        for (info, pos) in shaped.glyph_infos().iter().zip(shaped.glyph_positions()) {
            let mut converter = PathConverter(PathBuilder::new());
            let glyph_x = current_x + pos.x_offset as f32 * scale;
            let glyph_y = -(pos.y_offset as f32) * scale;
            let transform = Transform::from_scale(scale, -scale).post_translate(glyph_x, glyph_y);

            let _ = self
                .face
                .outline_glyph(GlyphId(info.glyph_id as u16), &mut converter);

            if let Some(path) = converter.0.finish() {
                if let Some(path_transformed) = path.transform(transform) {
                    text_path_builder.push_path(&path_transformed);
                }
            }

            current_x += pos.x_advance as f32 * scale;
        }

        let width = current_x as f64;
        let dx = match align {
            TextAlign::Left | TextAlign::Start => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right | TextAlign::End => -width,
        };
        let dy = self.baseline_offset(baseline, size);

        text_path_builder
            .finish()?
            .transform(Transform::from_translate((x + dx) as f32, (y + dy) as f32))
    }
}
