//! Text-on-path rendering layer.
//!
//! This module lays text out along polylines and draws it glyph by glyph.
//! It is organised around:
//! - A [`DrawingSurface`] trait for backend abstraction
//! - Style options passed explicitly with every call
//! - The layout/draw engine in [`text_path`]
//! - Host glue for labelled line features in [`feature`]

pub mod feature;
pub mod style;
pub mod surface;
pub mod text_path;

// Re-export key types
pub use feature::{
    PaintOutcome, TextPathFeature, TextPathOptions, TextPathSymbol, paint_polyline_text_path,
};
pub use style::{
    Color, ELLIPSIS, FontSpec, StyleOptions, TextAlign, TextBaseline, TextOverflow, parse_font,
};
pub use surface::{DrawingSurface, RecordingSurface, SurfaceStateGuard, TextMetrics};
pub use text_path::{
    GLYPH_STROKE_MIN_WIDTH, LETTER_PADDING_RATIO, PlacedGlyph, TextPathLayout,
    layout_text_on_path, render_text_on_path,
};

#[cfg(feature = "rendering")]
pub mod skia_surface;

#[cfg(feature = "rendering")]
pub mod font;

#[cfg(feature = "rendering")]
pub use skia_surface::SkiaSurface;

#[cfg(feature = "rendering")]
pub use font::Font;
