//! A tiny-skia based drawing surface.

use rustc_hash::FxHashMap;
use tiny_skia::{FillRule, Paint, PathBuilder, PixmapMut, Stroke, Transform};

use super::font::Font;
use super::style::{Color, FontSpec, TextAlign, TextBaseline};
use super::surface::{DrawingSurface, TextMetrics};
use crate::core::error::{TextPathError, TextPathResult};

// --- Conversion helpers ---

fn to_skia_paint(color: Color, alpha: f64) -> Paint<'static> {
    let alpha = (color.a as f64 * alpha.clamp(0.0, 1.0)).round() as u8;
    let mut sk_paint = Paint::default();
    sk_paint.set_color(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, alpha));
    sk_paint.anti_alias = true;
    sk_paint
}

fn to_skia_stroke(line_width: f64) -> Stroke {
    Stroke {
        width: line_width as f32,
        ..Stroke::default()
    }
}

#[derive(Clone)]
struct SkiaState {
    transform: Transform,
    font: Option<FontSpec>,
    text_align: TextAlign,
    text_baseline: TextBaseline,
    global_alpha: f64,
    line_width: f64,
    stroke_style: Color,
    fill_style: Color,
}

impl Default for SkiaState {
    fn default() -> Self {
        SkiaState {
            transform: Transform::identity(),
            font: None,
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
            global_alpha: 1.0,
            line_width: 1.0,
            stroke_style: Color::black(),
            fill_style: Color::black(),
        }
    }
}

/// Draws on a tiny-skia pixmap.
///
/// Fonts are registered by family name with [`SkiaSurface::load_font`] and
/// selected with CSS-like descriptions (`"16px Arial"`).
pub struct SkiaSurface<'a> {
    pixmap: PixmapMut<'a>,
    state_stack: Vec<SkiaState>,
    path_builder: PathBuilder,
    font_cache: FxHashMap<String, Font>,
}

enum TextPaintMode {
    Fill,
    Stroke,
}

impl<'a> SkiaSurface<'a> {
    pub fn new(pixmap: PixmapMut<'a>) -> Self {
        SkiaSurface {
            pixmap,
            state_stack: vec![SkiaState::default()],
            path_builder: PathBuilder::new(),
            font_cache: FxHashMap::default(),
        }
    }

    /// Register font data under a family name.
    pub fn load_font(&mut self, family: &str, data: &'static [u8]) -> TextPathResult<()> {
        let font = Font::new(data)?;
        self.font_cache.insert(family.to_string(), font);
        Ok(())
    }

    /// Pixmap size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Number of saved states not yet restored.
    pub fn state_depth(&self) -> usize {
        self.state_stack.len() - 1
    }

    fn current_state(&self) -> &SkiaState {
        // The base state is never popped.
        &self.state_stack[self.state_stack.len() - 1]
    }

    fn current_state_mut(&mut self) -> &mut SkiaState {
        let last = self.state_stack.len() - 1;
        &mut self.state_stack[last]
    }

    fn registered_font(&self, spec: &FontSpec) -> TextPathResult<&Font> {
        self.font_cache
            .get(&spec.family)
            .ok_or_else(|| TextPathError::FontNotLoaded(spec.family.clone()))
    }

    fn current_font(&self) -> TextPathResult<(&Font, f64)> {
        let spec = self
            .current_state()
            .font
            .as_ref()
            .ok_or_else(|| TextPathError::Surface("No font set".to_string()))?;
        Ok((self.registered_font(spec)?, spec.size))
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, mode: TextPaintMode) -> TextPathResult<()> {
        let state = self.current_state().clone();
        let (font, size) = self.current_font()?;
        let Some(path) = font.outline(text, size, state.text_align, state.text_baseline, x, y) else {
            // Whitespace has no outline.
            return Ok(());
        };

        match mode {
            TextPaintMode::Fill => {
                let paint = to_skia_paint(state.fill_style, state.global_alpha);
                self.pixmap
                    .fill_path(&path, &paint, FillRule::Winding, state.transform, None);
            }
            TextPaintMode::Stroke => {
                let paint = to_skia_paint(state.stroke_style, state.global_alpha);
                let stroke = to_skia_stroke(state.line_width);
                self.pixmap
                    .stroke_path(&path, &paint, &stroke, state.transform, None);
            }
        }
        Ok(())
    }
}

impl TextMetrics for SkiaSurface<'_> {
    fn measure_text(&mut self, text: &str, font: &str) -> TextPathResult<f64> {
        let spec: FontSpec = font.parse()?;
        Ok(self.registered_font(&spec)?.measure(text, spec.size))
    }
}

impl DrawingSurface for SkiaSurface<'_> {
    fn begin_path(&mut self) {
        self.path_builder = PathBuilder::new();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path_builder.move_to(x as f32, y as f32);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path_builder.line_to(x as f32, y as f32);
    }

    fn save_state(&mut self) {
        let current_state = self.current_state().clone();
        self.state_stack.push(current_state);
    }

    fn restore_state(&mut self) {
        if self.state_stack.len() > 1 {
            self.state_stack.pop();
        }
    }

    fn set_font(&mut self, font: &str) -> TextPathResult<()> {
        let spec: FontSpec = font.parse()?;
        if !self.font_cache.contains_key(&spec.family) {
            return Err(TextPathError::FontNotLoaded(spec.family));
        }
        self.current_state_mut().font = Some(spec);
        Ok(())
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.current_state_mut().text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.current_state_mut().text_baseline = baseline;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.current_state_mut().global_alpha = alpha;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.current_state_mut().stroke_style = color;
    }

    fn set_fill_style(&mut self, color: Color) {
        self.current_state_mut().fill_style = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.current_state_mut().line_width = width;
    }

    fn line_width(&self) -> f64 {
        self.current_state().line_width
    }

    fn translate(&mut self, x: f64, y: f64) {
        let state = self.current_state_mut();
        state.transform = state
            .transform
            .pre_concat(Transform::from_translate(x as f32, y as f32));
    }

    fn rotate(&mut self, angle: f64) {
        let state = self.current_state_mut();
        state.transform = state
            .transform
            .pre_concat(Transform::from_rotate(angle.to_degrees() as f32));
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> TextPathResult<()> {
        self.draw_text(text, x, y, TextPaintMode::Stroke)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> TextPathResult<()> {
        self.draw_text(text, x, y, TextPaintMode::Fill)
    }

    fn stroke_path(&mut self, opacity: f64) -> TextPathResult<()> {
        let builder = std::mem::replace(&mut self.path_builder, PathBuilder::new());
        // A path with a single move_to has nothing to stroke.
        let Some(path) = builder.finish() else {
            return Ok(());
        };

        let state = self.current_state();
        let paint = to_skia_paint(state.stroke_style, opacity);
        let stroke = to_skia_stroke(state.line_width);
        let transform = state.transform;
        self.pixmap
            .stroke_path(&path, &paint, &stroke, transform, None);
        Ok(())
    }
}
