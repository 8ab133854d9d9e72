//! Host glue for line features labelled along their geometry.
//!
//! A map layer paints each line feature once per frame. Features whose symbol
//! carries a text-path size get their name drawn along the line; everything
//! else is left to the host's plain line renderer, signalled by
//! [`PaintOutcome::NotTextPath`].

use log::debug;

use super::style::{Color, StyleOptions, TextAlign, TextBaseline, TextOverflow};
use super::surface::{DrawingSurface, SurfaceStateGuard};
use super::text_path::render_text_on_path;
use crate::core::error::TextPathResult;
use crate::core::geometry::{Point, dedup_adjacent_points};

/// Font sizes (px) outside this range are not drawn.
pub const MIN_FONT_SIZE: f64 = 3.0;
pub const MAX_FONT_SIZE: f64 = 1000.0;

/// Options of a text-path line feature.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPathOptions {
    /// The text drawn along the line
    pub text_name: String,
    pub font_family: String,
    pub text_justify: bool,
    pub text_overflow: TextOverflow,
    pub text_baseline: TextBaseline,
    /// Lines shorter than this (px) carry no text
    pub text_stroke_min: f64,
}

impl Default for TextPathOptions {
    fn default() -> Self {
        TextPathOptions {
            text_name: String::new(),
            font_family: "Arial".to_string(),
            text_justify: true,
            text_overflow: TextOverflow::Visible,
            text_baseline: TextBaseline::Middle,
            text_stroke_min: 5.0,
        }
    }
}

impl TextPathOptions {
    /// Style for one render call with the given resolved font.
    ///
    /// `text_stroke_min` becomes the minimum path length, so lines shorter
    /// than it carry no text. Set it to 0 to label lines of any length.
    pub fn style(&self, font: impl Into<String>) -> StyleOptions {
        StyleOptions::new(font)
            .with_overflow(self.text_overflow.clone())
            .with_justify(self.text_justify)
            .with_align(TextAlign::Center)
            .with_baseline(self.text_baseline)
            .with_min_path_length(self.text_stroke_min)
    }

    /// Font description for a symbol size at a map scale.
    ///
    /// The size is `symbol_size / map_scale` truncated to whole pixels;
    /// `None` when it is not finite or falls outside
    /// [`MIN_FONT_SIZE`]..=[`MAX_FONT_SIZE`].
    pub fn font_for_scale(&self, symbol_size: f64, map_scale: f64) -> Option<String> {
        let size = (symbol_size / map_scale).trunc();
        if !size.is_finite() || !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
            return None;
        }
        Some(format!("{}px {}", size, self.font_family))
    }
}

/// Symbol properties a text-path feature is styled with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPathSymbol {
    /// Font size at map scale 1
    pub text_path_size: f64,
    pub line_color: Color,
}

/// What [`TextPathFeature::paint_on`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// Text was drawn along the line
    Painted,
    /// The feature is a text path but its font size is out of range at this scale
    Skipped,
    /// The feature has no text-path symbol; the host draws a plain line
    NotTextPath,
}

/// A line feature labelled along its geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextPathFeature {
    pub options: TextPathOptions,
    pub symbol: Option<TextPathSymbol>,
}

impl TextPathFeature {
    pub fn new(options: TextPathOptions, symbol: Option<TextPathSymbol>) -> Self {
        TextPathFeature { options, symbol }
    }

    /// Paint the feature's text along `points` (screen space).
    ///
    /// `points` is deduplicated in place. Opacity applies to both the glyphs
    /// and the trailing path stroke.
    pub fn paint_on<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        points: &mut Vec<Point>,
        map_scale: f64,
        opacity: f64,
    ) -> TextPathResult<PaintOutcome> {
        let Some(symbol) = self.symbol.filter(|s| s.text_path_size != 0.0) else {
            return Ok(PaintOutcome::NotTextPath);
        };

        dedup_adjacent_points(points);

        let Some(font) = self.options.font_for_scale(symbol.text_path_size, map_scale) else {
            debug!(
                "text path '{}' skipped: size {} at scale {} out of range",
                self.options.text_name, symbol.text_path_size, map_scale
            );
            return Ok(PaintOutcome::Skipped);
        };

        paint_polyline_text_path(
            surface,
            points,
            &self.options.text_name,
            &font,
            symbol.line_color,
            opacity,
            &self.options,
        )?;
        Ok(PaintOutcome::Painted)
    }
}

/// Draw `text` along a polyline and stroke the accumulated path.
///
/// The surface is prepared inside one save/restore bracket: `font`, a zero
/// line width (glyphs are filled only), `stroke_color` as the stroke style and
/// `opacity` as global alpha.
pub fn paint_polyline_text_path<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    text: &str,
    font: &str,
    stroke_color: Color,
    opacity: f64,
    options: &TextPathOptions,
) -> TextPathResult<()> {
    let mut scoped = SurfaceStateGuard::new(surface);
    scoped.set_font(font)?;
    scoped.set_stroke_style(stroke_color);
    scoped.set_line_width(0.0);
    scoped.set_global_alpha(opacity);
    scoped.set_text_align(TextAlign::Center);
    scoped.set_text_baseline(options.text_baseline);

    scoped.begin_path();
    if let Some(first) = points.first() {
        scoped.move_to(first.x, first.y);
    }
    render_text_on_path(&mut *scoped, points, text, &options.style(font))?;
    scoped.stroke_path(opacity)
}
