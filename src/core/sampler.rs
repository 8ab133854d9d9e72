//! Arc-length sampling along a polyline.
//!
//! A [`PathSampler`] answers "where is the point `offset` units from the start
//! of the path, and which way does the path head there?". It keeps a cursor on
//! the current segment so that a sequence of non-decreasing offsets (one per
//! glyph) walks the polyline once instead of rescanning it from the origin.

use super::geometry::Point;

/// Position and rotation of one glyph on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// X coordinate of the glyph center
    pub x: f64,
    /// Y coordinate of the glyph center
    pub y: f64,
    /// Tangent angle of the segment in radians
    pub angle: f64,
}

/// Forward-only cursor over the segments of a polyline.
///
/// One sampler serves one render call. Offsets must be queried in
/// non-decreasing order; the cursor never moves backward, so a smaller offset
/// than a previous one is interpolated (extrapolated) on the current segment.
#[derive(Debug, Clone)]
pub struct PathSampler<'a> {
    points: &'a [Point],
    /// Index of the end vertex of the current segment (always >= 1)
    segment_end: usize,
    /// Cumulative distance from the path start to the current segment start
    distance_to_segment: f64,
    /// Length of the current segment, once computed
    segment_length: Option<f64>,
}

impl<'a> PathSampler<'a> {
    /// Create a sampler positioned on the first segment.
    ///
    /// Returns `None` when the polyline has fewer than two points.
    pub fn new(points: &'a [Point]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(PathSampler {
            points,
            segment_end: 1,
            distance_to_segment: 0.0,
            segment_length: None,
        })
    }

    /// Index of the end vertex of the segment the cursor sits on.
    pub fn segment_index(&self) -> usize {
        self.segment_end
    }

    /// Sample the path `offset` units from its start.
    ///
    /// Offsets past the last vertex are extrapolated along the last segment.
    pub fn point_at(&mut self, offset: f64) -> GlyphPlacement {
        let needs_advance = match self.segment_length {
            None => true,
            Some(length) => length == 0.0 || self.distance_to_segment + length < offset,
        };
        if needs_advance {
            self.advance_to(offset);
        }

        let start = self.points[self.segment_end - 1];
        let end = self.points[self.segment_end];
        let length = self.segment_length.unwrap_or(0.0);
        let dt = offset - self.distance_to_segment;

        let (x, y) = if dt == 0.0 || length == 0.0 {
            (start.x, start.y)
        } else {
            (
                start.x + (end.x - start.x) * dt / length,
                start.y + (end.y - start.y) * dt / length,
            )
        };

        GlyphPlacement {
            x,
            y,
            angle: (end.y - start.y).atan2(end.x - start.x),
        }
    }

    /// Move the cursor forward to the first segment whose end lies beyond
    /// `offset`, pinning it to the last segment.
    fn advance_to(&mut self, offset: f64) {
        let last = self.points.len() - 1;
        loop {
            let length = self.points[self.segment_end - 1].distance(&self.points[self.segment_end]);
            self.segment_length = Some(length);
            if self.distance_to_segment + length > offset || self.segment_end == last {
                break;
            }
            self.segment_end += 1;
            self.distance_to_segment += length;
        }
    }
}
