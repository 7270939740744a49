//! # quest_math - 2D Geometry Primitives
//!
//! Room-scale 2D math for the Quest Engine: vectors, rects and polygon
//! rings with the containment/distance queries the navigation and region
//! systems are built on.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod vector;
pub mod rect;
pub mod polygon;
pub mod intersect;

pub use vector::*;
pub use rect::*;
pub use polygon::*;
pub use intersect::*;

/// Common math constants
pub mod consts {
    /// General-purpose comparison epsilon.
    pub const EPSILON: f32 = 1e-6;
    /// Distance below which a point counts as lying on a polygon edge.
    pub const BOUNDARY_EPSILON: f32 = 1e-4;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Inverse linear interpolation: where `value` sits between `a` and `b`, 0..1.
/// Returns 0 when the range is degenerate.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    let range = b - a;
    if range.abs() <= consts::EPSILON {
        0.0
    } else {
        clamp01((value - a) / range)
    }
}

/// Clamp value to the 0..1 range
#[inline]
pub fn clamp01(value: f32) -> f32 {
    if value < 0.0 {
        0.0
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

pub mod prelude {
    pub use crate::vector::Vec2;
    pub use crate::rect::Rect;
    pub use crate::polygon::{Containment, Polygon, Winding};
    pub use crate::intersect::{
        nearest_point_on_segment, segment_intersection, segments_intersect,
    };
    pub use crate::{clamp01, inverse_lerp, lerp};
}
