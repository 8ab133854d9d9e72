//! Text-on-path layout and drawing.
//!
//! Text is drawn one glyph at a time. Each glyph is centered on its own slot
//! along the path, rotated to the tangent of the segment under that center and
//! drawn inside its own save/restore bracket:
//!
//! ```text
//!  start      wl/2       wl + padding
//!  |-----[ A ]-----|-pad-|-----[ B ]-----| ...
//! ```
//!
//! Before the walk the text is fitted to the path: it may be truncated with an
//! overflow marker, aligned, or justified so that it exactly spans the path.

use log::{debug, trace};
use smallvec::SmallVec;

use super::style::{StyleOptions, TextAlign};
use super::surface::{DrawingSurface, SurfaceStateGuard, TextMetrics};
use crate::core::error::TextPathResult;
use crate::core::geometry::{Point, dedup_adjacent_points, path_length};
use crate::core::sampler::{GlyphPlacement, PathSampler};

/// Default gap between glyphs, as a fraction of the width of a space.
pub const LETTER_PADDING_RATIO: f64 = 0.25;

/// Glyph outlines are stroked only when the surface line width exceeds this.
pub const GLYPH_STROKE_MIN_WIDTH: f64 = 0.1;

type GlyphBuffer = SmallVec<[char; 32]>;

/// A glyph placed on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Advance width of the glyph
    pub advance: f64,
    /// Center of the glyph and its rotation
    pub placement: GlyphPlacement,
}

/// The result of fitting and placing text on a path.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPathLayout {
    /// The text actually drawn, including any overflow marker
    pub text: String,
    /// Total length of the deduplicated path
    pub path_length: f64,
    /// Gap added after each glyph (doubled after a space)
    pub letter_padding: f64,
    /// Offset of the first glyph's left edge from the path start
    pub start: f64,
    pub glyphs: Vec<PlacedGlyph>,
}

impl TextPathLayout {
    /// Offset of the right edge of the last glyph.
    pub fn end(&self) -> f64 {
        let mut offset = self.start;
        for (i, glyph) in self.glyphs.iter().enumerate() {
            offset += glyph.advance;
            if i + 1 < self.glyphs.len() {
                offset += padding_after(glyph.ch, self.letter_padding);
            }
        }
        offset
    }
}

/// Text fitted to a path, ready for the glyph walk.
#[derive(Debug)]
struct FittedText {
    chars: GlyphBuffer,
    letter_padding: f64,
    start: f64,
}

/// Walks glyph slots along the path.
struct GlyphWalk<'a> {
    sampler: PathSampler<'a>,
    offset: f64,
    letter_padding: f64,
}

impl GlyphWalk<'_> {
    /// Place a glyph of width `advance` in the next slot.
    fn place(&mut self, ch: char, advance: f64) -> GlyphPlacement {
        let placement = self.sampler.point_at(self.offset + advance / 2.0);
        self.offset += advance + padding_after(ch, self.letter_padding);
        placement
    }
}

fn padding_after(ch: char, letter_padding: f64) -> f64 {
    if ch == ' ' {
        letter_padding * 2.0
    } else {
        letter_padding
    }
}

fn count_spaces(chars: &[char]) -> usize {
    chars.iter().filter(|&&ch| ch == ' ').count()
}

/// Deduplicate a copy of `points` and check that it can carry text.
///
/// The caller's points are never modified.
fn prepare_path(points: &[Point], style: &StyleOptions) -> Option<(Vec<Point>, f64)> {
    let mut points = points.to_vec();
    dedup_adjacent_points(&mut points);
    if points.len() < 2 {
        debug!("text path skipped: {} distinct point(s)", points.len());
        return None;
    }

    let length = path_length(&points);
    if length < style.min_path_length {
        debug!(
            "text path skipped: length {} below minimum {}",
            length, style.min_path_length
        );
        return None;
    }
    Some((points, length))
}

/// Truncate, align and space `text` for a path of length `length`.
fn fit_text<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    length: f64,
    text: &str,
    style: &StyleOptions,
) -> TextPathResult<Option<FittedText>> {
    let font = style.font.as_str();
    let mut letter_padding = metrics.measure_text(" ", font)? * LETTER_PADDING_RATIO;
    let mut chars: GlyphBuffer = text.chars().collect();
    let mut spaces = count_spaces(&chars);
    let mut truncated = false;

    if let Some(marker) = style.overflow.marker() {
        let required = metrics.measure_text(text, font)?
            + (chars.len() as f64 - 1.0 + spaces as f64) * letter_padding;
        if required > length {
            let marker_gaps = marker.chars().count() as f64 - 1.0;
            loop {
                if chars.pop() == Some(' ') {
                    spaces -= 1;
                }
                if chars.is_empty() {
                    break;
                }
                let candidate: String = chars.iter().copied().chain(marker.chars()).collect();
                let required = metrics.measure_text(&candidate, font)?
                    + (chars.len() as f64 + marker_gaps + spaces as f64) * letter_padding;
                if required <= length {
                    break;
                }
            }
            chars.extend(marker.chars());
            truncated = true;
        }
    }

    if chars.is_empty() {
        debug!("text path skipped: no text left to draw");
        return Ok(None);
    }
    if truncated {
        debug!(
            "text truncated to {} glyph(s) on a path of length {}",
            chars.len(),
            length
        );
    }

    let start = if style.justify {
        let gaps = chars.len() as f64 - 1.0 + spaces as f64;
        if gaps > 0.0 {
            let width = measure_chars(metrics, &chars, font)?;
            letter_padding = (length - width) / gaps;
        }
        0.0
    } else {
        match style.align {
            TextAlign::Left | TextAlign::Start => 0.0,
            TextAlign::Center | TextAlign::Right | TextAlign::End => {
                let width = measure_chars(metrics, &chars, font)?;
                let start =
                    length - width - (chars.len() as f64 + spaces as f64) * letter_padding;
                if style.align == TextAlign::Center {
                    start / 2.0
                } else {
                    start
                }
            }
        }
    };

    Ok(Some(FittedText {
        chars,
        letter_padding,
        start,
    }))
}

fn measure_chars<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    chars: &[char],
    font: &str,
) -> TextPathResult<f64> {
    let text: String = chars.iter().collect();
    metrics.measure_text(&text, font)
}

/// Fit and place `text` on the polyline without drawing it.
///
/// Text is measured in `style.font`. Returns `Ok(None)` when nothing would be drawn: fewer than two distinct
/// points, a path shorter than `style.min_path_length`, or text that
/// truncates to nothing.
pub fn layout_text_on_path<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    points: &[Point],
    text: &str,
    style: &StyleOptions,
) -> TextPathResult<Option<TextPathLayout>> {
    let Some((points, length)) = prepare_path(points, style) else {
        return Ok(None);
    };
    let Some(fitted) = fit_text(metrics, length, text, style)? else {
        return Ok(None);
    };
    let Some(sampler) = PathSampler::new(&points) else {
        return Ok(None);
    };

    let mut walk = GlyphWalk {
        sampler,
        offset: fitted.start,
        letter_padding: fitted.letter_padding,
    };
    let mut glyphs = Vec::with_capacity(fitted.chars.len());
    let mut buf = [0u8; 4];
    for &ch in &fitted.chars {
        let advance = metrics.measure_text(ch.encode_utf8(&mut buf), &style.font)?;
        let placement = walk.place(ch, advance);
        glyphs.push(PlacedGlyph {
            ch,
            advance,
            placement,
        });
    }

    Ok(Some(TextPathLayout {
        text: fitted.chars.iter().collect(),
        path_length: length,
        letter_padding: fitted.letter_padding,
        start: fitted.start,
        glyphs,
    }))
}

/// Draw `text` along the polyline `points`.
///
/// Every glyph is drawn inside its own save/restore bracket with the font and
/// baseline of `style`, centered on the path and rotated to the local
/// tangent, so the surface state is left as it was found. Degenerate input
/// draws nothing and is not an error.
/// Surface failures are returned unmodified, after the failing glyph's state
/// has been restored.
///
/// `points` is deduplicated on a private copy; the caller's slice is left
/// as is.
pub fn render_text_on_path<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    text: &str,
    style: &StyleOptions,
) -> TextPathResult<()> {
    let Some((points, length)) = prepare_path(points, style) else {
        return Ok(());
    };

    let Some(fitted) = fit_text(surface, length, text, style)? else {
        return Ok(());
    };
    let Some(sampler) = PathSampler::new(&points) else {
        return Ok(());
    };

    let mut walk = GlyphWalk {
        sampler,
        offset: fitted.start,
        letter_padding: fitted.letter_padding,
    };
    let mut buf = [0u8; 4];
    for &ch in &fitted.chars {
        let glyph = ch.encode_utf8(&mut buf);
        let advance = surface.measure_text(glyph, &style.font)?;
        let placement = walk.place(ch, advance);
        trace!(
            "glyph '{}' at ({:.2}, {:.2}) angle {:.4}",
            ch, placement.x, placement.y, placement.angle
        );
        draw_glyph(surface, glyph, placement, style)?;
    }

    Ok(())
}

fn draw_glyph<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    glyph: &str,
    placement: GlyphPlacement,
    style: &StyleOptions,
) -> TextPathResult<()> {
    let mut scoped = SurfaceStateGuard::new(surface);
    scoped.set_font(&style.font)?;
    scoped.set_text_baseline(style.baseline);
    scoped.set_text_align(TextAlign::Center);
    scoped.translate(placement.x, placement.y);
    scoped.rotate(placement.angle);
    if scoped.line_width() > GLYPH_STROKE_MIN_WIDTH {
        scoped.stroke_text(glyph, 0.0, 0.0)?;
    }
    scoped.fill_text(glyph, 0.0, 0.0)
}
