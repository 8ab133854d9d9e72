//! Polyline geometry primitives.
//!
//! Points arrive in screen space from the host. Before a polyline is measured
//! or sampled, adjacent coincident points are collapsed so that no segment has
//! zero length (a zero-length segment has no defined tangent).

use std::fmt;

/// Two coordinates closer than this on both axes are the same point.
pub const SAME_POINT_EPSILON: f64 = 0.000001;

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Check whether two points coincide within [`SAME_POINT_EPSILON`] on both axes.
pub fn is_same_point(a: &Point, b: &Point) -> bool {
    (a.x - b.x).abs() < SAME_POINT_EPSILON && (a.y - b.y).abs() < SAME_POINT_EPSILON
}

/// Remove adjacent duplicate points in place.
///
/// Each run of consecutive coincident points keeps its first member. Points
/// that are only equal to a non-neighbour are left alone.
pub fn dedup_adjacent_points(points: &mut Vec<Point>) {
    points.dedup_by(|next, kept| is_same_point(kept, next));
}

/// Total arc length of a polyline: the sum of its segment lengths.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
