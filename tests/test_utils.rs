//! Test utilities and helpers for canvas-textpath tests

#![allow(dead_code)]

use canvas_textpath::{GlyphPlacement, Point, RecordingSurface};
use std::path::PathBuf;

/// Install a test logger (idempotent).
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A horizontal path from the origin of the given length
pub fn straight(length: f64) -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(length, 0.0)]
}

/// A zig-zag polyline with segments in four directions
pub fn zig_zag() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(30.0, 0.0),
        Point::new(30.0, 40.0),
        Point::new(-10.0, 40.0),
        Point::new(-10.0, 10.0),
        Point::new(50.0, 90.0),
    ]
}

/// Recording surface with 10 wide glyphs and an 8 wide space (letter padding 2)
pub fn surface() -> RecordingSurface {
    RecordingSurface::new(10.0).with_char_width(' ', 8.0)
}

/// Point at `offset` by plain linear interpolation, scanning from the origin.
///
/// Uses the same segment selection as the sampler: an offset exactly on a
/// vertex belongs to the segment starting there, and offsets past the end
/// extend the last segment.
pub fn direct_point_at(points: &[Point], offset: f64) -> GlyphPlacement {
    let mut distance = 0.0;
    let last = points.len() - 1;
    for i in 1..points.len() {
        let (a, b) = (points[i - 1], points[i]);
        let length = a.distance(&b);
        if distance + length > offset || i == last {
            let dt = offset - distance;
            let (x, y) = if dt == 0.0 || length == 0.0 {
                (a.x, a.y)
            } else {
                (a.x + (b.x - a.x) * dt / length, a.y + (b.y - a.y) * dt / length)
            };
            return GlyphPlacement {
                x,
                y,
                angle: (b.y - a.y).atan2(b.x - a.x),
            };
        }
        distance += length;
    }
    unreachable!("paths have at least two points")
}

/// Candidate locations of a TrueType font on the test machine
pub fn system_font_candidates() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Load the first available system font, leaked for the surface's 'static lifetime.
pub fn load_system_font() -> Option<&'static [u8]> {
    system_font_candidates()
        .into_iter()
        .find_map(|path| std::fs::read(path).ok())
        .map(|data| &*Box::leak(data.into_boxed_slice()))
}
