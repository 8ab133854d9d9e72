//! # canvas-textpath: text along polylines on a 2D canvas
//!
//! canvas-textpath draws a string glyph by glyph along an arbitrary polyline,
//! the way map renderers label roads and rivers. Every glyph is centered on
//! its own slot along the line and rotated to follow it; text that does not
//! fit can be truncated with an overflow marker, and text that does can be
//! aligned or justified to span the whole line.
//!
//! ## Quick Start
//!
//! ```rust
//! use canvas_textpath::{Point, RecordingSurface, StyleOptions, render_text_on_path};
//!
//! let mut surface = RecordingSurface::new(10.0);
//! let road = [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)];
//! let style = StyleOptions::new("12px Arial").with_justify(true);
//!
//! render_text_on_path(&mut surface, &road, "Main Street", &style)?;
//! assert_eq!(surface.count("fill_text"), 11);
//! # Ok::<(), canvas_textpath::TextPathError>(())
//! ```
//!
//! ## Architecture
//!
//! 1. **Geometry** ([`core`](crate::core)): point deduplication, polyline length and a
//!    forward-only [`PathSampler`] returning positions and tangent angles
//! 2. **Layout** ([`rendering::text_path`]): overflow truncation, alignment,
//!    justification and the glyph walk
//! 3. **Surfaces** ([`rendering::surface`]): the [`DrawingSurface`] trait, a
//!    [`RecordingSurface`] display list and, with the `rendering` feature, a
//!    tiny-skia raster surface
//! 4. **Host glue** ([`rendering::feature`]): font sizing from map scale and
//!    surface setup for labelled line features
//!
//! Layout never fails on degenerate input (too few points, a path that is
//! too short, text that truncates to nothing); it simply draws nothing.
//! Errors only come from the drawing surface and are returned unmodified.

pub mod core;
pub mod rendering;

// Re-export main types for convenience
pub use crate::core::{
    GlyphPlacement, PathSampler, Point, TextPathError, TextPathResult, dedup_adjacent_points,
    is_same_point, path_length,
};

// Re-export rendering types
pub use rendering::{
    Color, DrawingSurface, PaintOutcome, RecordingSurface, StyleOptions, SurfaceStateGuard,
    TextAlign, TextBaseline, TextMetrics, TextOverflow, TextPathFeature, TextPathLayout,
    TextPathOptions, TextPathSymbol, layout_text_on_path, paint_polyline_text_path,
    render_text_on_path,
};

#[cfg(feature = "rendering")]
pub use rendering::SkiaSurface;
