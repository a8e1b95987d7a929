//! Pure geometry for Cranpose
//!
//! Points, sizes and rectangles in logical pixels, plus the interpolation
//! helpers used by gesture synthesis.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{lerp, lerp_f32, Point, Rect, Size};
}
