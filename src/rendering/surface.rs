//! Drawing surface abstraction.
//!
//! This module defines the [`DrawingSurface`] trait, the narrow set of canvas
//! capabilities the text-on-path renderer needs: text metrics, path
//! accumulation, a save/restore state stack, transforms and text drawing.
//! Different backends (raster, display list, GPU) implement it without the
//! layout code changing.

use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashMap;

use super::style::{Color, TextAlign, TextBaseline, parse_font};
use crate::core::error::{TextPathError, TextPathResult};

/// Measures rendered text.
pub trait TextMetrics {
    /// Advance width of `text` drawn in `font`, in path coordinate units.
    ///
    /// The surface's current font is neither used nor changed.
    fn measure_text(&mut self, text: &str, font: &str) -> TextPathResult<f64>;
}

/// A 2D canvas the text-on-path renderer can draw on.
///
/// Property setters mirror the canvas API: they affect every later draw call
/// until the enclosing [`restore_state`](DrawingSurface::restore_state).
pub trait DrawingSurface: TextMetrics {
    /// Begin a new path, discarding any accumulated one.
    fn begin_path(&mut self);

    /// Move the current point to (x, y), starting a new subpath.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight line segment from the current point to (x, y).
    fn line_to(&mut self, x: f64, y: f64);

    /// Push a copy of the current drawing state.
    fn save_state(&mut self);

    /// Pop the drawing state pushed by the matching [`save_state`](DrawingSurface::save_state).
    fn restore_state(&mut self);

    /// Set the current font from a description such as `"16px Arial"`.
    fn set_font(&mut self, font: &str) -> TextPathResult<()>;

    fn set_text_align(&mut self, align: TextAlign);

    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Set the opacity multiplier for every later draw (0.0 - 1.0).
    fn set_global_alpha(&mut self, alpha: f64);

    fn set_stroke_style(&mut self, color: Color);

    fn set_fill_style(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    /// Current line width.
    fn line_width(&self) -> f64;

    /// Translate the current transform by (x, y).
    fn translate(&mut self, x: f64, y: f64);

    /// Rotate the current transform by `angle` radians.
    fn rotate(&mut self, angle: f64);

    /// Stroke the outline of `text` at (x, y) in the current transform.
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> TextPathResult<()>;

    /// Fill `text` at (x, y) in the current transform.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> TextPathResult<()>;

    /// Stroke the accumulated path with the current stroke style, scaled by `opacity`.
    fn stroke_path(&mut self, opacity: f64) -> TextPathResult<()>;
}

/// A save/restore bracket around a surface.
///
/// Creating the guard saves the surface state; dropping it restores the
/// state, including when the scope is left early through `?`.
pub struct SurfaceStateGuard<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawingSurface + ?Sized> SurfaceStateGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save_state();
        SurfaceStateGuard { surface }
    }
}

impl<S: DrawingSurface + ?Sized> Deref for SurfaceStateGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for SurfaceStateGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for SurfaceStateGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore_state();
    }
}

/// A surface that records drawing operations instead of producing pixels.
///
/// Text is measured with a per-character width table, which makes layouts
/// fully deterministic. Useful for testing and for hosts that want a display
/// list of the glyph draws.
#[derive(Debug)]
pub struct RecordingSurface {
    /// Width of any character missing from `char_widths`
    default_char_width: f64,
    char_widths: FxHashMap<char, f64>,
    /// Drawing state stack
    state_stack: Vec<RecordingState>,
    /// Recorded operations
    operations: Vec<String>,
    /// Name of a fallible operation that should fail
    fail_on: Option<String>,
}

#[derive(Debug, Clone)]
struct RecordingState {
    ctm: [f64; 6],
    font: Option<String>,
    text_align: TextAlign,
    text_baseline: TextBaseline,
    global_alpha: f64,
    line_width: f64,
    stroke_style: Color,
    fill_style: Color,
}

impl Default for RecordingState {
    fn default() -> Self {
        RecordingState {
            ctm: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
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

impl Default for RecordingSurface {
    fn default() -> Self {
        RecordingSurface::new(10.0)
    }
}

impl RecordingSurface {
    /// Create a surface where every character is `char_width` wide.
    pub fn new(char_width: f64) -> Self {
        RecordingSurface {
            default_char_width: char_width,
            char_widths: FxHashMap::default(),
            state_stack: vec![RecordingState::default()],
            operations: Vec::new(),
            fail_on: None,
        }
    }

    /// Override the width of a single character.
    pub fn with_char_width(mut self, ch: char, width: f64) -> Self {
        self.char_widths.insert(ch, width);
        self
    }

    /// Make the named fallible operation (`"set_font"`, `"measure_text"`,
    /// `"stroke_text"`, `"fill_text"` or `"stroke_path"`) return an error.
    pub fn fail_on(&mut self, operation: &str) {
        self.fail_on = Some(operation.to_string());
    }

    /// Get the recorded operations.
    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    /// Clear the recorded operations.
    pub fn clear_operations(&mut self) {
        self.operations.clear();
    }

    /// Number of recorded operations whose name is `name`.
    pub fn count(&self, name: &str) -> usize {
        self.operations
            .iter()
            .filter(|op| op.split('(').next() == Some(name))
            .count()
    }

    /// Number of saved states not yet restored.
    pub fn state_depth(&self) -> usize {
        self.state_stack.len() - 1
    }

    /// Current transformation matrix [a b c d e f].
    pub fn ctm(&self) -> [f64; 6] {
        self.current().ctm
    }

    /// Current font description, if one was set.
    pub fn font(&self) -> Option<&str> {
        self.current().font.as_deref()
    }

    pub fn text_align(&self) -> TextAlign {
        self.current().text_align
    }

    pub fn text_baseline(&self) -> TextBaseline {
        self.current().text_baseline
    }

    pub fn global_alpha(&self) -> f64 {
        self.current().global_alpha
    }

    pub fn stroke_style(&self) -> Color {
        self.current().stroke_style
    }

    pub fn fill_style(&self) -> Color {
        self.current().fill_style
    }

    fn current(&self) -> &RecordingState {
        // The base state is never popped.
        &self.state_stack[self.state_stack.len() - 1]
    }

    fn current_mut(&mut self) -> &mut RecordingState {
        let last = self.state_stack.len() - 1;
        &mut self.state_stack[last]
    }

    fn check(&self, operation: &str) -> TextPathResult<()> {
        match &self.fail_on {
            Some(name) if name == operation => Err(TextPathError::Injected(name.clone())),
            _ => Ok(()),
        }
    }

    fn concat_matrix(&mut self, matrix: [f64; 6]) {
        let state = self.current_mut();
        let [a, b, c, d, e, f] = matrix;
        let [ctm_a, ctm_b, ctm_c, ctm_d, ctm_e, ctm_f] = state.ctm;
        state.ctm = [
            ctm_a * a + ctm_c * b,
            ctm_b * a + ctm_d * b,
            ctm_a * c + ctm_c * d,
            ctm_b * c + ctm_d * d,
            ctm_a * e + ctm_c * f + ctm_e,
            ctm_b * e + ctm_d * f + ctm_f,
        ];
    }
}

impl TextMetrics for RecordingSurface {
    fn measure_text(&mut self, text: &str, font: &str) -> TextPathResult<f64> {
        self.check("measure_text")?;
        parse_font(font)?;
        Ok(text
            .chars()
            .map(|ch| {
                self.char_widths
                    .get(&ch)
                    .copied()
                    .unwrap_or(self.default_char_width)
            })
            .sum())
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.operations.push("begin_path".to_string());
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.operations.push(format!("move_to({},{})", x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.operations.push(format!("line_to({},{})", x, y));
    }

    fn save_state(&mut self) {
        let current = self.current().clone();
        self.state_stack.push(current);
        self.operations.push("save_state".to_string());
    }

    fn restore_state(&mut self) {
        if self.state_stack.len() > 1 {
            self.state_stack.pop();
        }
        self.operations.push("restore_state".to_string());
    }

    fn set_font(&mut self, font: &str) -> TextPathResult<()> {
        self.check("set_font")?;
        parse_font(font)?;
        self.current_mut().font = Some(font.to_string());
        self.operations.push(format!("set_font({})", font));
        Ok(())
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.current_mut().text_align = align;
        self.operations
            .push(format!("set_text_align({})", align.as_str()));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.current_mut().text_baseline = baseline;
        self.operations
            .push(format!("set_text_baseline({})", baseline.as_str()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.current_mut().global_alpha = alpha;
        self.operations.push(format!("set_global_alpha({})", alpha));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.current_mut().stroke_style = color;
        self.operations.push(format!("set_stroke_style({})", color));
    }

    fn set_fill_style(&mut self, color: Color) {
        self.current_mut().fill_style = color;
        self.operations.push(format!("set_fill_style({})", color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.current_mut().line_width = width;
        self.operations.push(format!("set_line_width({})", width));
    }

    fn line_width(&self) -> f64 {
        self.current().line_width
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.concat_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        self.operations.push(format!("translate({},{})", x, y));
    }

    fn rotate(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        self.concat_matrix([cos, sin, -sin, cos, 0.0, 0.0]);
        self.operations.push(format!("rotate({})", angle));
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> TextPathResult<()> {
        self.check("stroke_text")?;
        self.operations
            .push(format!("stroke_text({},{},{})", text, x, y));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> TextPathResult<()> {
        self.check("fill_text")?;
        self.operations
            .push(format!("fill_text({},{},{})", text, x, y));
        Ok(())
    }

    fn stroke_path(&mut self, opacity: f64) -> TextPathResult<()> {
        self.check("stroke_path")?;
        self.operations.push(format!("stroke_path({})", opacity));
        Ok(())
    }
}
