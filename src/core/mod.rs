//! Core geometry for text-on-path layout.
//!
//! - [`geometry`]: points, deduplication and polyline length
//! - [`sampler`]: forward-only arc-length sampling with tangent angles
//! - [`error`]: the error type shared by every surface operation

pub mod error;
pub mod geometry;
pub mod sampler;

pub use error::{TextPathError, TextPathResult};
pub use geometry::{Point, SAME_POINT_EPSILON, dedup_adjacent_points, is_same_point, path_length};
pub use sampler::{GlyphPlacement, PathSampler};
